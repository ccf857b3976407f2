//! Relational-to-graph synchronization pipeline.
//!
//! One-shot destructive rebuild: clears the graph, recreates constraints,
//! bulk-merges nodes and edges from the relational source, then derives
//! initial `VIEWED` edges from declared interests.

pub mod source;

use eventure_core::EngineResult;
use neo4rs::{BoltMap, BoltString, BoltType, Query};
use serde::Serialize;
use tracing::info;

use crate::{schema, GraphClient};
use source::RelationalSource;

/// Per-phase counts read from the relational source during a sync run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SyncReport {
    pub users: usize,
    pub events: usize,
    pub categories: usize,
    pub in_category_edges: usize,
    pub preferred_edges: usize,
    pub viewed_edges: usize,
}

/// Rebuild the entire graph from the relational source.
///
/// Destructive: step one deletes every node and edge, including any
/// `VIEWED`/`LIKED` edges created by live traffic since the last run. The
/// rebuild is idempotent with respect to the source snapshot, but it is not
/// state-preserving, and it assumes exclusive access to the store for its
/// duration — callers gate it behind a maintenance window.
///
/// After each phase the source count and the resulting graph count are
/// logged side by side as a soundness check; mismatches are logged, never
/// asserted.
pub async fn run_full_sync(
    client: &GraphClient,
    source: &dyn RelationalSource,
) -> EngineResult<SyncReport> {
    info!("Starting full graph sync");
    let mut report = SyncReport::default();

    clear_graph(client).await?;
    schema::initialize_schema(client).await?;

    report.users = load_nodes(client, "User", source.user_ids()?).await?;
    report.events = load_nodes(client, "Event", source.event_ids()?).await?;
    report.categories = load_nodes(client, "Category", source.category_ids()?).await?;

    report.in_category_edges = load_edges(
        client,
        "Event",
        "IN_CATEGORY",
        "Category",
        source.event_categories()?,
    )
    .await?;
    report.preferred_edges = load_edges(
        client,
        "User",
        "PREFERRED",
        "Category",
        source.user_interests()?,
    )
    .await?;

    report.viewed_edges = derive_viewed_edges(client).await?;

    info!(
        users = report.users,
        events = report.events,
        categories = report.categories,
        in_category = report.in_category_edges,
        preferred = report.preferred_edges,
        viewed = report.viewed_edges,
        "Full sync complete"
    );
    Ok(report)
}

/// Delete every node and edge.
async fn clear_graph(client: &GraphClient) -> EngineResult<()> {
    client
        .execute(Query::new("MATCH (n) DETACH DELETE n".to_string()))
        .await?;
    info!("Cleared graph");
    Ok(())
}

/// Bulk-merge id-only nodes for one label. Returns the source count.
async fn load_nodes(client: &GraphClient, label: &str, ids: Vec<String>) -> EngineResult<usize> {
    let source_count = ids.len();

    let query = Query::new(format!(
        "UNWIND $ids AS id
         MERGE (n:{label} {{id: id}})"
    ))
    .param("ids", ids);
    client.execute(query).await?;

    let graph_count = client.count_label(label).await?;
    info!(label, source = source_count, graph = graph_count, "Loaded nodes");
    Ok(source_count)
}

/// Bulk-merge edges of one type between two labels. Pairs that match no
/// endpoint nodes are skipped. Returns the source count.
async fn load_edges(
    client: &GraphClient,
    from_label: &str,
    rel_type: &str,
    to_label: &str,
    pairs: Vec<(String, String)>,
) -> EngineResult<usize> {
    let source_count = pairs.len();

    let query = Query::new(format!(
        "UNWIND $edges AS edge
         MATCH (a:{from_label} {{id: edge.from}}), (b:{to_label} {{id: edge.to}})
         MERGE (a)-[:{rel_type}]->(b)"
    ))
    .param("edges", edge_params(&pairs));
    client.execute(query).await?;

    let graph_count = client.count_edge_type(rel_type).await?;
    info!(rel_type, source = source_count, graph = graph_count, "Loaded edges");
    Ok(source_count)
}

/// Seed a `VIEWED` edge for every user/event pair connected through a
/// shared category: declared interest counts as an initial view. Returns
/// the resulting `VIEWED` count in the graph.
async fn derive_viewed_edges(client: &GraphClient) -> EngineResult<usize> {
    let query = Query::new(
        "MATCH (u:User)-[:PREFERRED]->(c:Category)<-[:IN_CATEGORY]-(e:Event)
         MERGE (u)-[:VIEWED]->(e)"
            .to_string(),
    );
    client.execute(query).await?;

    let graph_count = client.count_edge_type("VIEWED").await?;
    info!(graph = graph_count, "Derived VIEWED edges");
    Ok(graph_count)
}

/// Build the `$edges` parameter as a list of `{from, to}` maps.
fn edge_params(pairs: &[(String, String)]) -> Vec<BoltType> {
    pairs
        .iter()
        .map(|(from, to)| {
            BoltType::Map(BoltMap::from_iter(vec![
                (
                    BoltString::from("from"),
                    BoltType::String(BoltString::from(from.as_str())),
                ),
                (
                    BoltString::from("to"),
                    BoltType::String(BoltString::from(to.as_str())),
                ),
            ]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_params_build_from_to_maps() {
        let params = edge_params(&[("e1".to_string(), "c1".to_string())]);
        assert_eq!(params.len(), 1);
        match &params[0] {
            BoltType::Map(map) => {
                let from = map.value.get(&BoltString::from("from"));
                assert_eq!(from, Some(&BoltType::String(BoltString::from("e1"))));
                let to = map.value.get(&BoltString::from("to"));
                assert_eq!(to, Some(&BoltType::String(BoltString::from("c1"))));
            }
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn edge_params_handle_empty_input() {
        assert!(edge_params(&[]).is_empty());
    }
}
