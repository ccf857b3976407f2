//! View/like/unlike commands.

use anyhow::Result;
use clap::Subcommand;
use eventure_core::Interaction;
use eventure_graph::Engine;

use crate::output::print_response;

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Record that a user viewed an event
    View {
        /// User id
        user_id: String,
        /// Event id
        event_id: String,
    },

    /// Record that a user liked an event
    Like {
        /// User id
        user_id: String,
        /// Event id
        event_id: String,
    },

    /// Remove a user's like from an event
    Unlike {
        /// User id
        user_id: String,
        /// Event id
        event_id: String,
    },
}

pub async fn execute(cmd: ActivityCommands, engine: &Engine) -> Result<()> {
    match cmd {
        ActivityCommands::View { user_id, event_id } => {
            let response = engine.view_event(Interaction { user_id, event_id }).await;
            print_response(&response)
        }
        ActivityCommands::Like { user_id, event_id } => {
            let response = engine.like_event(Interaction { user_id, event_id }).await;
            print_response(&response)
        }
        ActivityCommands::Unlike { user_id, event_id } => {
            let response = engine.unlike_event(Interaction { user_id, event_id }).await;
            print_response(&response)
        }
    }
}
