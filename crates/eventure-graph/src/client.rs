//! Neo4j connection client.

use eventure_core::{EngineError, EngineResult, GraphConfig};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;

/// Client for graph store operations.
///
/// Each statement runs in its own auto-committed session; callers that need
/// a single transaction around several statements go through [`execute_all`].
///
/// [`execute_all`]: GraphClient::execute_all
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// Note: neo4rs uses a lazy deadpool — `Graph::connect` only creates the
    /// pool object and does NOT establish a real bolt connection yet. We run
    /// a cheap `RETURN 1` ping immediately so an unreachable store fails here
    /// with [`EngineError::StoreUnavailable`] instead of on the first real
    /// operation.
    pub async fn connect(config: &GraphConfig) -> EngineResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db("neo4j")
            .max_connections(8)
            .fetch_size(50)
            .build()
            .map_err(EngineError::store_unavailable)?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(EngineError::store_unavailable)?;

        // Ping to force an actual TCP+bolt handshake.
        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(EngineError::store_unavailable)?;

        Ok(Self { graph })
    }

    /// Execute a Cypher statement that returns no results.
    pub async fn execute(&self, query: Query) -> EngineResult<()> {
        self.graph.run(query).await.map_err(EngineError::query)
    }

    /// Execute several Cypher statements in one transaction.
    ///
    /// Commits when every statement succeeds; rolls back on the first
    /// failure. The transaction is released on both paths.
    pub async fn execute_all(&self, queries: Vec<Query>) -> EngineResult<()> {
        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(EngineError::query)?;

        match txn.run_queries(queries).await {
            Ok(()) => txn.commit().await.map_err(EngineError::query),
            Err(err) => {
                // Roll back best-effort; the original failure is the one
                // worth reporting.
                let _ = txn.rollback().await;
                Err(EngineError::query(err))
            }
        }
    }

    /// Execute a Cypher query and return its rows in store order.
    pub async fn query(&self, query: Query) -> EngineResult<Vec<neo4rs::Row>> {
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(EngineError::query)?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.map_err(EngineError::query)? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(
        &self,
        query: Query,
        field: &str,
    ) -> EngineResult<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field).map_err(EngineError::query)?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Get node and relationship counts for status display and sync
    /// soundness logging.
    pub async fn counts(&self) -> EngineResult<GraphCounts> {
        let node_query = Query::new("MATCH (n) RETURN count(n) as count".to_string());
        let rel_query = Query::new("MATCH ()-[r]->() RETURN count(r) as count".to_string());

        let nodes: i64 = self.query_scalar(node_query, "count").await?.unwrap_or(0);
        let relationships: i64 = self.query_scalar(rel_query, "count").await?.unwrap_or(0);

        Ok(GraphCounts {
            nodes: nodes as usize,
            relationships: relationships as usize,
        })
    }

    /// Count nodes with a specific label.
    pub async fn count_label(&self, label: &str) -> EngineResult<usize> {
        // Labels cannot be parameterized in Cypher; restrict to identifier
        // characters before splicing.
        let safe: String = label
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        let query = Query::new(format!("MATCH (n:{safe}) RETURN count(n) as count"));
        let count: i64 = self.query_scalar(query, "count").await?.unwrap_or(0);
        Ok(count as usize)
    }

    /// Count relationships of a specific type.
    pub async fn count_edge_type(&self, rel_type: &str) -> EngineResult<usize> {
        let safe: String = rel_type
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        let query = Query::new(format!("MATCH ()-[r:{safe}]->() RETURN count(r) as count"));
        let count: i64 = self.query_scalar(query, "count").await?.unwrap_or(0);
        Ok(count as usize)
    }

    /// Get a reference to the underlying neo4rs Graph.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}
