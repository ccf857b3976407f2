//! Event management commands.

use anyhow::Result;
use clap::Subcommand;
use eventure_core::EventUpsert;
use eventure_graph::Engine;

use crate::output::print_response;

#[derive(Subcommand)]
pub enum EventCommands {
    /// Create or update an event
    Upsert {
        /// Event id
        id: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Category ids (repeatable); replaces the full set
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// Delete an event and all its edges
    Delete {
        /// Event id
        id: String,
    },
}

pub async fn execute(cmd: EventCommands, engine: &Engine) -> Result<()> {
    match cmd {
        EventCommands::Upsert {
            id,
            name,
            tags,
            categories,
        } => {
            let response = engine
                .upsert_event(EventUpsert {
                    id,
                    name,
                    tags,
                    categories,
                })
                .await;
            print_response(&response)
        }
        EventCommands::Delete { id } => {
            let response = engine.delete_event(&id).await;
            print_response(&response)
        }
    }
}
