//! Graph maintenance commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use eventure_core::EngineConfig;
use eventure_graph::{Engine, SqliteSource};

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Rebuild the graph from the relational source.
    ///
    /// Destructive: wipes the graph first, including live view/like edges.
    Sync,

    /// Show graph node and relationship counts
    Status,
}

pub async fn execute(cmd: GraphCommands, engine: &Engine, config: &EngineConfig) -> Result<()> {
    match cmd {
        GraphCommands::Sync => cmd_sync(engine, config).await,
        GraphCommands::Status => cmd_status(engine).await,
    }
}

async fn cmd_sync(engine: &Engine, config: &EngineConfig) -> Result<()> {
    println!("{}", "Rebuilding graph from relational source...".bold());

    let source = SqliteSource::open(&config.source.db_path)?;
    source.ensure_schema()?;

    let response = engine.run_full_sync(&source).await;
    match &response.content {
        Some(report) => {
            println!("\n{}", "Sync complete:".green().bold());
            println!("  Users:       {}", report.users);
            println!("  Events:      {}", report.events);
            println!("  Categories:  {}", report.categories);
            println!(
                "  Edges:       {} in-category, {} preferred, {} viewed",
                report.in_category_edges, report.preferred_edges, report.viewed_edges
            );
            Ok(())
        }
        None => crate::output::print_response(&response),
    }
}

async fn cmd_status(engine: &Engine) -> Result<()> {
    let counts = engine.client().counts().await?;
    println!("{}", "Graph status".bold());
    println!("  Nodes:         {}", counts.nodes);
    println!("  Relationships: {}", counts.relationships);
    Ok(())
}
