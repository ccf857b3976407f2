//! User management and preference commands.

use anyhow::Result;
use clap::Subcommand;
use eventure_core::UserUpsert;
use eventure_graph::Engine;

use crate::output::print_response;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create or update a user
    Upsert {
        /// User id
        id: String,
        /// Preferred category ids (repeatable); replaces the full set
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// Delete a user and all their edges
    Delete {
        /// User id
        id: String,
    },

    /// Show a user's declared category preferences
    Prefs {
        /// User id
        id: String,
    },

    /// Show a user's three most viewed categories
    TopCategories {
        /// User id
        id: String,
    },
}

pub async fn execute(cmd: UserCommands, engine: &Engine) -> Result<()> {
    match cmd {
        UserCommands::Upsert { id, categories } => {
            let response = engine.upsert_user(UserUpsert { id, categories }).await;
            print_response(&response)
        }
        UserCommands::Delete { id } => {
            let response = engine.delete_user(&id).await;
            print_response(&response)
        }
        UserCommands::Prefs { id } => {
            let response = engine.get_user_preferences(&id).await;
            print_response(&response)
        }
        UserCommands::TopCategories { id } => {
            let response = engine.get_user_most_viewed_category(&id).await;
            print_response(&response)
        }
    }
}
