/// Label Analysis Demo
///
/// Uploads a product label photo and extracts its ingredient list with the
/// Gemini-backed ingredient agent.
///
/// Usage:
///   cargo run --example analyze_label -- path/to/label.jpg
///
/// Requirements:
///   - GEMINI_API_KEY and TAVILY_API_KEY set in the environment (or a .env file)
use labelwise::imaging::{resize_for_display, DISPLAY_WIDTH};
use labelwise::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nSet GEMINI_API_KEY and TAVILY_API_KEY before running this demo.");
            std::process::exit(1);
        }
    };

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: cargo run --example analyze_label -- path/to/label.jpg");
        std::process::exit(1);
    };

    let bytes = std::fs::read(&path)?;
    let upload = ImageData::from_bytes(bytes);

    // Preview rescale, as the UI would show it
    let preview = resize_for_display(&upload)?;
    println!("Display preview: {} bytes at width {}", preview.len(), DISPLAY_WIDTH);
    println!();

    let agent = Arc::new(IngredientAgent::from_config(&config));
    let orchestrator = Orchestrator::new(agent);

    let mut session = Session::new();
    session.select_source(SourceKind::Upload);

    println!("Analyzing label image...");
    match orchestrator.analyze(&mut session, &upload).await {
        Ok(Some(ingredients)) => {
            println!();
            println!("{}", ingredients);
        }
        Ok(None) => {
            println!("Analysis was suppressed by session state.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
