//! Operation layer: typed requests in, response envelopes out.
//!
//! Transport-independent facade over the mutation service, the
//! recommendation queries and the synchronizer. Requests are validated
//! here; engine errors are never retried, only mapped onto the failure
//! envelope.

use eventure_core::response::{
    CategoryCount, CategoryRef, EventAck, InteractionAck, RecommendedEvent, UserAck,
};
use eventure_core::{EngineError, EngineResult, EventUpsert, Interaction, Response, UserUpsert};
use tracing::{info, warn};

use crate::sync::source::RelationalSource;
use crate::{mutate, queries, sync, GraphClient, SyncReport};

/// The recommendation engine facade.
#[derive(Clone)]
pub struct Engine {
    client: GraphClient,
}

impl Engine {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// The underlying graph client, for status queries.
    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    /// Create or update an event and replace its category edges.
    pub async fn upsert_event(&self, req: EventUpsert) -> Response<EventAck> {
        info!(event_id = %req.id, "Upsert event");
        let result = async {
            req.validate()?;
            let event_id = mutate::upsert_event(&self.client, &req).await?;
            Ok(EventAck { event_id })
        }
        .await;
        respond(result)
    }

    /// Delete an event and everything attached to it. No-op on missing id.
    pub async fn delete_event(&self, event_id: &str) -> Response<EventAck> {
        info!(event_id, "Delete event");
        let result = async {
            require_id(event_id, "event id")?;
            mutate::delete_event(&self.client, event_id).await?;
            Ok(EventAck {
                event_id: event_id.to_string(),
            })
        }
        .await;
        respond(result)
    }

    /// Create or update a user and replace their preference edges.
    pub async fn upsert_user(&self, req: UserUpsert) -> Response<UserAck> {
        info!(user_id = %req.id, "Upsert user");
        let result = async {
            req.validate()?;
            let user_id = mutate::upsert_user(&self.client, &req).await?;
            Ok(UserAck { user_id })
        }
        .await;
        respond(result)
    }

    /// Delete a user and everything attached to them. No-op on missing id.
    pub async fn delete_user(&self, user_id: &str) -> Response<UserAck> {
        info!(user_id, "Delete user");
        let result = async {
            require_id(user_id, "user id")?;
            mutate::delete_user(&self.client, user_id).await?;
            Ok(UserAck {
                user_id: user_id.to_string(),
            })
        }
        .await;
        respond(result)
    }

    /// Record a view. Idempotent.
    pub async fn view_event(&self, req: Interaction) -> Response<InteractionAck> {
        info!(user_id = %req.user_id, event_id = %req.event_id, "View event");
        let result = async {
            req.validate()?;
            mutate::view_event(&self.client, &req).await?;
            Ok(ack(&req))
        }
        .await;
        respond(result)
    }

    /// Record a like. Idempotent.
    pub async fn like_event(&self, req: Interaction) -> Response<InteractionAck> {
        info!(user_id = %req.user_id, event_id = %req.event_id, "Like event");
        let result = async {
            req.validate()?;
            mutate::like_event(&self.client, &req).await?;
            Ok(ack(&req))
        }
        .await;
        respond(result)
    }

    /// Remove a like. No-op when the edge does not exist.
    pub async fn unlike_event(&self, req: Interaction) -> Response<InteractionAck> {
        info!(user_id = %req.user_id, event_id = %req.event_id, "Unlike event");
        let result = async {
            req.validate()?;
            mutate::unlike_event(&self.client, &req).await?;
            Ok(ack(&req))
        }
        .await;
        respond(result)
    }

    /// Recommend up to `k` events (default 20) for a user.
    pub async fn get_recommendation(
        &self,
        user_id: &str,
        k: Option<usize>,
    ) -> Response<Vec<RecommendedEvent>> {
        let k = k.unwrap_or(queries::DEFAULT_K);
        info!(user_id, k, "Get recommendation");
        let result = async {
            require_id(user_id, "user id")?;
            queries::get_recommendation(&self.client, user_id, k).await
        }
        .await;
        respond(result)
    }

    /// The user's three most viewed categories.
    pub async fn get_user_most_viewed_category(
        &self,
        user_id: &str,
    ) -> Response<Vec<CategoryCount>> {
        info!(user_id, "Get most viewed categories");
        let result = async {
            require_id(user_id, "user id")?;
            queries::get_user_most_viewed_category(&self.client, user_id).await
        }
        .await;
        respond(result)
    }

    /// The user's declared category preferences.
    pub async fn get_user_preferences(&self, user_id: &str) -> Response<Vec<CategoryRef>> {
        info!(user_id, "Get user preferences");
        let result = async {
            require_id(user_id, "user id")?;
            queries::get_user_preferences(&self.client, user_id).await
        }
        .await;
        respond(result)
    }

    /// Destructive full rebuild from the relational source. See
    /// [`sync::run_full_sync`] for the staleness trade-off.
    pub async fn run_full_sync(&self, source: &dyn RelationalSource) -> Response<SyncReport> {
        info!("Run full sync");
        respond(sync::run_full_sync(&self.client, source).await)
    }
}

fn ack(req: &Interaction) -> InteractionAck {
    InteractionAck {
        user_id: req.user_id.clone(),
        event_id: req.event_id.clone(),
    }
}

fn require_id(id: &str, what: &str) -> EngineResult<()> {
    if id.trim().is_empty() {
        return Err(EngineError::validation(format!("{what} must not be empty")));
    }
    Ok(())
}

fn respond<T>(result: EngineResult<T>) -> Response<T> {
    if let Err(err) = &result {
        warn!(error = %err, "Operation failed");
    }
    Response::from_result(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_fail_validation() {
        assert!(require_id("u1", "user id").is_ok());
        let err = require_id("  ", "user id").unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
