//! Typed requests accepted by the operation layer.
//!
//! The original service read untyped payloads; these records make the
//! required and optional fields explicit and validate at the boundary.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Create-or-update request for an Event node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpsert {
    pub id: String,
    pub name: String,
    /// Free-form tags. Stored on the node as a single `|`-delimited string;
    /// no reader in the engine splits it back.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category ids this event belongs to. The full `IN_CATEGORY` edge set
    /// is replaced on every upsert.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl EventUpsert {
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::validation("event id must not be empty"));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(EngineError::validation("category ids must not be empty"));
        }
        Ok(())
    }

    /// Tags in the stored wire form.
    pub fn joined_tags(&self) -> String {
        self.tags.join("|")
    }
}

/// Create-or-update request for a User node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpsert {
    pub id: String,
    /// Category ids the user declared interest in. The full `PREFERRED`
    /// edge set is replaced on every upsert.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl UserUpsert {
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::validation("user id must not be empty"));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(EngineError::validation("category ids must not be empty"));
        }
        Ok(())
    }
}

/// A user/event pair for view, like and unlike operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub event_id: String,
}

impl Interaction {
    pub fn validate(&self) -> EngineResult<()> {
        if self.user_id.trim().is_empty() || self.event_id.trim().is_empty() {
            return Err(EngineError::validation(
                "user id and event id must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_join_with_pipe() {
        let req = EventUpsert {
            id: "e1".into(),
            name: "Rustconf".into(),
            tags: vec!["rust".into(), "conference".into()],
            categories: vec![],
        };
        assert_eq!(req.joined_tags(), "rust|conference");
    }

    #[test]
    fn empty_tags_join_to_empty_string() {
        let req = EventUpsert {
            id: "e1".into(),
            name: "Rustconf".into(),
            tags: vec![],
            categories: vec![],
        };
        assert_eq!(req.joined_tags(), "");
    }

    #[test]
    fn blank_ids_are_rejected() {
        let req = EventUpsert {
            id: "  ".into(),
            name: "x".into(),
            tags: vec![],
            categories: vec![],
        };
        assert!(req.validate().is_err());

        let req = UserUpsert {
            id: "u1".into(),
            categories: vec!["".into()],
        };
        assert!(req.validate().is_err());

        let req = Interaction {
            user_id: "u1".into(),
            event_id: "".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn tags_and_categories_default_when_absent() {
        let req: EventUpsert =
            serde_json::from_str(r#"{"id":"e1","name":"Rustconf"}"#).unwrap();
        assert!(req.tags.is_empty());
        assert!(req.categories.is_empty());
        assert!(req.validate().is_ok());
    }
}
