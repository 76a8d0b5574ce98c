use anyhow::Context;
use clap::Parser;
use deal_discovery::cli::{Cli, Commands};
use deal_discovery::format::render_outcome;
use deal_discovery::tools::classify::{ClassifyRequest, handle_classify};
use deal_discovery::{Config, DealServer, HttpBackend, SearchExecutor, SearchRequest, SearchSession};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    deal_discovery::logging::init();

    let cli = Cli::parse();

    // Classification needs neither configuration nor network
    if let Some(Commands::Classify { query, cards }) = &cli.command {
        print!(
            "{}",
            handle_classify(ClassifyRequest {
                query: query.clone(),
                card_types: Some(cards.clone()),
            })
        );
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let backend = HttpBackend::new(&config.api)?;
    let session = Arc::new(SearchSession::new(SearchExecutor::new(backend, config.search)));

    match cli.command {
        Some(Commands::Search { query, cards }) => {
            let request = SearchRequest::new(query).with_card_types(cards);
            match session.search(request).await {
                Some(outcome) => print!("{}", render_outcome(&outcome)),
                None => anyhow::bail!("search was cancelled before it completed"),
            }
        }
        Some(Commands::Classify { .. }) | Some(Commands::Serve) | None => {
            tracing::info!("Starting deal-discovery MCP server");

            let server = DealServer::new(session);
            let service = server.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Error serving MCP server: {:?}", e);
            })?;

            service.waiting().await?;
        }
    }

    Ok(())
}
