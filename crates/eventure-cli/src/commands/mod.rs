//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventure_core::EngineConfig;
use eventure_graph::{Engine, GraphClient};

pub mod activity;
pub mod event;
pub mod graph;
pub mod user;

/// Eventure - Graph-Based Event Recommendations
#[derive(Parser)]
#[command(name = "eventure")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage events
    #[command(subcommand)]
    Event(event::EventCommands),

    /// Manage users and their preferences
    #[command(subcommand)]
    User(user::UserCommands),

    /// Record user activity (views and likes)
    #[command(subcommand)]
    Activity(activity::ActivityCommands),

    /// Recommend events for a user
    Recommend {
        /// User id
        user_id: String,
        /// Maximum number of events to return
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Graph maintenance (sync, status)
    #[command(subcommand)]
    Graph(graph::GraphCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = EngineConfig::load()?;
        let client = GraphClient::connect(&config.graph).await?;
        let engine = Engine::new(client);

        match self.command {
            Commands::Event(cmd) => event::execute(cmd, &engine).await,
            Commands::User(cmd) => user::execute(cmd, &engine).await,
            Commands::Activity(cmd) => activity::execute(cmd, &engine).await,
            Commands::Recommend { user_id, limit } => {
                let response = engine.get_recommendation(&user_id, Some(limit)).await;
                crate::output::print_response(&response)
            }
            Commands::Graph(cmd) => graph::execute(cmd, &engine, &config).await,
        }
    }
}
