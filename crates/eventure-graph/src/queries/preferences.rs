//! Category preference queries.

use eventure_core::response::{CategoryCount, CategoryRef};
use eventure_core::{EngineError, EngineResult};
use neo4rs::Query;

use crate::GraphClient;

/// Top 3 categories by how many of their events the user has viewed.
///
/// Counts `VIEWED` edges and legacy `FOLLOWED` edges left by older writers.
/// Ties fall in store row order.
pub async fn get_user_most_viewed_category(
    client: &GraphClient,
    user_id: &str,
) -> EngineResult<Vec<CategoryCount>> {
    let query = Query::new(
        "MATCH (u:User {id: $user_id})-[:VIEWED|FOLLOWED]-(e:Event)-[:IN_CATEGORY]->(c:Category)
         WITH c.id AS category_id, coalesce(c.name, '') AS category_name, count(e) AS event_count
         ORDER BY event_count DESC
         LIMIT 3
         RETURN category_id, category_name, event_count"
            .to_string(),
    )
    .param("user_id", user_id);

    let rows = client.query(query).await?;
    let mut categories = Vec::with_capacity(rows.len());
    for row in rows {
        categories.push(CategoryCount {
            category_id: row.get("category_id").map_err(EngineError::query)?,
            category_name: row.get("category_name").map_err(EngineError::query)?,
            event_count: row.get("event_count").map_err(EngineError::query)?,
        });
    }
    Ok(categories)
}

/// All categories the user declared as preferred, unranked.
pub async fn get_user_preferences(
    client: &GraphClient,
    user_id: &str,
) -> EngineResult<Vec<CategoryRef>> {
    let query = Query::new(
        "MATCH (u:User {id: $user_id})-[:PREFERRED]->(c:Category)
         RETURN c.id AS category_id, coalesce(c.name, '') AS category_name"
            .to_string(),
    )
    .param("user_id", user_id);

    let rows = client.query(query).await?;
    let mut categories = Vec::with_capacity(rows.len());
    for row in rows {
        categories.push(CategoryRef {
            category_id: row.get("category_id").map_err(EngineError::query)?,
            category_name: row.get("category_name").map_err(EngineError::query)?,
        });
    }
    Ok(categories)
}
