//! Similarity-based event recommendation.
//!
//! Two phases. First, every other user is scored against the target with the
//! store's Adamic-Adar link prediction (sum of `1/log(degree)` over common
//! neighbors in the interaction graph) and the ten best are kept. Second,
//! the events those users viewed or liked are accumulated, distinct, in
//! traversal order, capped at `k`. The result keeps accumulation order; it
//! is never re-sorted by aggregate relevance.

use std::collections::HashSet;

use eventure_core::response::RecommendedEvent;
use eventure_core::{EngineError, EngineResult};
use neo4rs::Query;
use tracing::debug;

use crate::GraphClient;

/// Default number of events returned by a recommendation.
pub const DEFAULT_K: usize = 20;

/// How many similarity neighbors feed the aggregation phase.
const NEIGHBOR_LIMIT: i64 = 10;

/// Compute up to `k` recommended events for a user.
///
/// A user sharing no common neighbor with anyone scores zero everywhere and
/// gets an empty list; that is a normal outcome, not an error.
pub async fn get_recommendation(
    client: &GraphClient,
    user_id: &str,
    k: usize,
) -> EngineResult<Vec<RecommendedEvent>> {
    let neighbors = top_similar_users(client, user_id).await?;
    if neighbors.is_empty() {
        debug!(user_id, "No similarity neighbors; empty recommendation");
        return Ok(Vec::new());
    }

    // UNWIND preserves the order of $ids, so events arrive grouped by
    // neighbor in descending score order.
    let query = Query::new(
        "UNWIND $ids AS id
         MATCH (u:User {id: id})-[:VIEWED|LIKED]->(e:Event)
         RETURN e.id AS event_id, coalesce(e.name, '') AS event_name"
            .to_string(),
    )
    .param("ids", neighbors);

    let rows = client.query(query).await?;
    let mut pairs = Vec::with_capacity(rows.len());
    for row in rows {
        let event_id: String = row.get("event_id").map_err(EngineError::query)?;
        let event_name: String = row.get("event_name").map_err(EngineError::query)?;
        pairs.push((event_id, event_name));
    }

    let events = accumulate_distinct(pairs, k);
    debug!(user_id, returned = events.len(), "Computed recommendation");
    Ok(events)
}

/// Rank every other user by Adamic-Adar similarity to the target and return
/// the top ids in descending score order.
///
/// Zero scores (no common neighbor) are dropped; ties keep store row order.
async fn top_similar_users(client: &GraphClient, user_id: &str) -> EngineResult<Vec<String>> {
    let query = Query::new(
        "MATCH (p1:User {id: $user_id})
         MATCH (p2:User)
         WHERE p1 <> p2
         WITH p2, gds.alpha.linkprediction.adamicAdar(p1, p2) AS score
         WHERE score > 0.0
         ORDER BY score DESC
         LIMIT $limit
         RETURN p2.id AS user_id, score"
            .to_string(),
    )
    .param("user_id", user_id)
    .param("limit", NEIGHBOR_LIMIT);

    let rows = client.query(query).await?;
    let mut ids = Vec::with_capacity(rows.len());
    for row in rows {
        let id: String = row.get("user_id").map_err(EngineError::query)?;
        ids.push(id);
    }
    Ok(ids)
}

/// Keep the first occurrence of every event id, in input order, up to `k`.
fn accumulate_distinct(pairs: Vec<(String, String)>, k: usize) -> Vec<RecommendedEvent> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();

    for (event_id, event_name) in pairs {
        if events.len() == k {
            break;
        }
        if seen.insert(event_id.clone()) {
            events.push(RecommendedEvent {
                event_id,
                event_name,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: &str, name: &str) -> (String, String) {
        (id.to_string(), name.to_string())
    }

    #[test]
    fn accumulation_preserves_first_seen_order() {
        let pairs = vec![
            pair("e3", "gig"),
            pair("e1", "expo"),
            pair("e3", "gig"),
            pair("e2", "fair"),
        ];
        let events = accumulate_distinct(pairs, 20);
        let ids: Vec<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids, vec!["e3", "e1", "e2"]);
    }

    #[test]
    fn duplicates_do_not_count_against_the_cap() {
        let pairs = vec![
            pair("e1", "a"),
            pair("e1", "a"),
            pair("e2", "b"),
            pair("e3", "c"),
        ];
        let events = accumulate_distinct(pairs, 2);
        let ids: Vec<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(accumulate_distinct(Vec::new(), 20).is_empty());
    }

    #[test]
    fn cap_of_zero_returns_nothing() {
        let events = accumulate_distinct(vec![pair("e1", "a")], 0);
        assert!(events.is_empty());
    }
}
