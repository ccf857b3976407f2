//! Mutation operations over the preference graph.
//!
//! Node upserts use merge semantics (create-if-absent, update-if-present).
//! `IN_CATEGORY` and `PREFERRED` edge sets are replaced wholesale on every
//! upsert; `VIEWED` and `LIKED` edges are incremental and idempotent. Every
//! edge create is a single `MATCH … MERGE` statement, so there is no window
//! between an existence check and the create.

use eventure_core::{EngineResult, EventUpsert, Interaction, UserUpsert};
use neo4rs::Query;
use tracing::debug;

use crate::GraphClient;

/// Create or update an Event node and replace its category edges.
///
/// Runs in one transaction: node merge, old `IN_CATEGORY` edges deleted, one
/// edge merged per supplied category id. Category ids that match no Category
/// node are skipped silently. Returns the event id.
pub async fn upsert_event(client: &GraphClient, req: &EventUpsert) -> EngineResult<String> {
    let merge_node = Query::new(
        "MERGE (e:Event {id: $id})
         SET e.name = $name, e.tags = $tags"
            .to_string(),
    )
    .param("id", req.id.as_str())
    .param("name", req.name.as_str())
    .param("tags", req.joined_tags());

    let clear_edges = Query::new(
        "MATCH (e:Event {id: $id})-[r:IN_CATEGORY]->(:Category)
         DELETE r"
            .to_string(),
    )
    .param("id", req.id.as_str());

    let create_edges = Query::new(
        "UNWIND $categories AS category_id
         MATCH (e:Event {id: $id}), (c:Category {id: category_id})
         MERGE (e)-[:IN_CATEGORY]->(c)"
            .to_string(),
    )
    .param("id", req.id.as_str())
    .param("categories", req.categories.clone());

    client
        .execute_all(vec![merge_node, clear_edges, create_edges])
        .await?;

    debug!(event_id = %req.id, categories = req.categories.len(), "Upserted event");
    Ok(req.id.clone())
}

/// Delete an Event node and every edge incident to it.
///
/// Succeeds with no effect when the id does not exist.
pub async fn delete_event(client: &GraphClient, event_id: &str) -> EngineResult<()> {
    let query = Query::new(
        "MATCH (e:Event {id: $id})
         DETACH DELETE e"
            .to_string(),
    )
    .param("id", event_id);

    client.execute(query).await?;
    debug!(event_id, "Deleted event");
    Ok(())
}

/// Create or update a User node and replace its preference edges.
///
/// Runs in one transaction, same shape as [`upsert_event`]. Returns the
/// user id.
pub async fn upsert_user(client: &GraphClient, req: &UserUpsert) -> EngineResult<String> {
    let merge_node = Query::new("MERGE (u:User {id: $id})".to_string()).param("id", req.id.as_str());

    let clear_edges = Query::new(
        "MATCH (u:User {id: $id})-[r:PREFERRED]->(:Category)
         DELETE r"
            .to_string(),
    )
    .param("id", req.id.as_str());

    let create_edges = Query::new(
        "UNWIND $categories AS category_id
         MATCH (u:User {id: $id}), (c:Category {id: category_id})
         MERGE (u)-[:PREFERRED]->(c)"
            .to_string(),
    )
    .param("id", req.id.as_str())
    .param("categories", req.categories.clone());

    client
        .execute_all(vec![merge_node, clear_edges, create_edges])
        .await?;

    debug!(user_id = %req.id, categories = req.categories.len(), "Upserted user");
    Ok(req.id.clone())
}

/// Delete a User node and every edge incident to it.
///
/// Succeeds with no effect when the id does not exist.
pub async fn delete_user(client: &GraphClient, user_id: &str) -> EngineResult<()> {
    let query = Query::new(
        "MATCH (u:User {id: $id})
         DETACH DELETE u"
            .to_string(),
    )
    .param("id", user_id);

    client.execute(query).await?;
    debug!(user_id, "Deleted user");
    Ok(())
}

/// Record that a user viewed an event.
///
/// MERGE keeps the edge unique per pair: calling this twice leaves exactly
/// one `VIEWED` edge. A missing user or event matches nothing and the call
/// is a no-op.
pub async fn view_event(client: &GraphClient, interaction: &Interaction) -> EngineResult<()> {
    let query = Query::new(
        "MATCH (u:User {id: $user_id}), (e:Event {id: $event_id})
         MERGE (u)-[:VIEWED]->(e)"
            .to_string(),
    )
    .param("user_id", interaction.user_id.as_str())
    .param("event_id", interaction.event_id.as_str());

    client.execute(query).await?;
    debug!(user_id = %interaction.user_id, event_id = %interaction.event_id, "Viewed event");
    Ok(())
}

/// Record that a user liked an event. Idempotent, same guard as
/// [`view_event`].
pub async fn like_event(client: &GraphClient, interaction: &Interaction) -> EngineResult<()> {
    let query = Query::new(
        "MATCH (u:User {id: $user_id}), (e:Event {id: $event_id})
         MERGE (u)-[:LIKED]->(e)"
            .to_string(),
    )
    .param("user_id", interaction.user_id.as_str())
    .param("event_id", interaction.event_id.as_str());

    client.execute(query).await?;
    debug!(user_id = %interaction.user_id, event_id = %interaction.event_id, "Liked event");
    Ok(())
}

/// Remove a user's `LIKED` edge to an event. Succeeds with no effect when
/// the edge does not exist.
pub async fn unlike_event(client: &GraphClient, interaction: &Interaction) -> EngineResult<()> {
    let query = Query::new(
        "MATCH (u:User {id: $user_id})-[r:LIKED]->(e:Event {id: $event_id})
         DELETE r"
            .to_string(),
    )
    .param("user_id", interaction.user_id.as_str())
    .param("event_id", interaction.event_id.as_str());

    client.execute(query).await?;
    debug!(user_id = %interaction.user_id, event_id = %interaction.event_id, "Unliked event");
    Ok(())
}
