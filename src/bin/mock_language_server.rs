/*!
 * Mock language detection server.
 *
 * Answers every `POST /detect` with a fixed language tag so the validator can be
 * exercised locally without the real detection service.
 */

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use caption_validator::logging::CustomLogger;
use caption_validator::providers::mock_server::{self, MockServerResponse, MockServerState};

#[derive(Parser, Debug)]
#[command(name = "mock-language-server")]
#[command(version)]
#[command(about = "Mock language detection endpoint for caption-validator")]
struct Options {
    /// Language tag returned for every request
    #[arg(long, default_value = "en-US")]
    lang: String,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8081")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;
    let options = Options::parse();

    let state = MockServerState::new(MockServerResponse::Language(options.lang.clone()));
    let (addr, handle) = mock_server::spawn(&options.addr, state)
        .await
        .with_context(|| format!("Failed to bind {}", options.addr))?;

    info!("Mock language server listening on http://{}/detect (lang={})", addr, options.lang);

    tokio::select! {
        result = handle => result.context("Mock language server task failed")?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}
