//! Response envelope and payload types for the operation layer.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};

/// Outcome marker for an operation envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// Envelope returned by every operation: a payload on success, an error
/// kind on failure. Never both.
#[derive(Debug, Clone, Serialize)]
pub struct Response<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl<T> Response<T> {
    pub fn success(content: T) -> Self {
        Self {
            status: Status::Success,
            content: Some(content),
            error: None,
        }
    }

    pub fn failure(err: &EngineError) -> Self {
        Self {
            status: Status::Failure,
            content: None,
            error: Some(err.kind()),
        }
    }

    pub fn from_result(result: Result<T, EngineError>) -> Self {
        match result {
            Ok(content) => Self::success(content),
            Err(ref err) => Self::failure(err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Acknowledgement for event upsert/delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAck {
    pub event_id: String,
}

/// Acknowledgement for user upsert/delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAck {
    pub user_id: String,
}

/// Acknowledgement for view/like/unlike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionAck {
    pub user_id: String,
    pub event_id: String,
}

/// One recommended event, in accumulation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedEvent {
    pub event_id: String,
    pub event_name: String,
}

/// A category with how many of its events the user has viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category_id: String,
    pub category_name: String,
    pub event_count: i64,
}

/// A category a user declared as preferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub category_id: String,
    pub category_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_field() {
        let resp = Response::success(EventAck {
            event_id: "e1".into(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["content"]["event_id"], "e1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_envelope_carries_error_kind_only() {
        let resp: Response<EventAck> =
            Response::from_result(Err(EngineError::validation("bad payload")));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["error"], "validation_error");
        assert!(json.get("content").is_none());
    }
}
