//! WebTools-RS demo entry point
//!
//! Runs one tool invocation from the command line:
//! `webtools-rs search "rust async runtimes"` or
//! `webtools-rs fetch https://example.com`.

use anyhow::Result;
use serde_json::json;
use tracing::{info, Level};
use webtools_rs::config::Settings;
use webtools_rs::tools::{ContentBlock, Tool, WebFetchTool, WebSearchTool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "help".to_string());
    let argument = args.next().unwrap_or_default();

    // Load configuration
    let mut settings = match std::env::var("WEBTOOLS_CONFIG") {
        Ok(path) => Settings::from_file(path)?,
        Err(_) => Settings::default(),
    };
    settings.merge_env();

    info!("webtools-rs v{}", webtools_rs::VERSION);

    let output = match mode.as_str() {
        "search" => {
            let tool = WebSearchTool::new(&settings)?;
            tool.execute(json!({ "query": argument }), None).await?
        }
        "fetch" => {
            let tool = WebFetchTool::new(&settings)?;
            tool.execute(json!({ "url": argument }), None).await?
        }
        _ => {
            eprintln!("usage: webtools-rs <search|fetch> <query|url>");
            std::process::exit(2);
        }
    };

    for block in &output.content {
        match block {
            ContentBlock::Text { text } => println!("{}", text),
            ContentBlock::Image { mime_type, data } => {
                println!("[image {} ({} bytes base64)]", mime_type, data.len())
            }
        }
    }

    Ok(())
}
