/// Follow-up Chat Demo
///
/// Analyzes a label photo, then answers free-form questions grounded in the
/// extracted ingredient list.
///
/// Usage:
///   cargo run --example followup_chat -- path/to/label.jpg
///
/// Requirements:
///   - GEMINI_API_KEY and TAVILY_API_KEY set in the environment (or a .env file)
use labelwise::prelude::*;
use std::io::{self, BufRead, Write};
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

    let agent = Arc::new(IngredientAgent::from_config(&config));
    let orchestrator = Orchestrator::new(agent);
    let mut session = Session::new();

    if let Some(path) = std::env::args().nth(1) {
        let bytes = std::fs::read(&path)?;
        let upload = ImageData::from_bytes(bytes);

        session.select_source(SourceKind::Upload);

        println!("Analyzing label image...");
        match orchestrator.analyze(&mut session, &upload).await {
            Ok(Some(ingredients)) => {
                println!();
                println!("{}", ingredients);
                println!();
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("Analysis failed: {}", e);
                eprintln!("Continuing without ingredient context.");
            }
        }
    } else {
        println!("No image given; questions will be answered without ingredient context.");
    }

    println!("Ask questions about the product (empty line to quit).");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();
        if question.is_empty() {
            break;
        }

        match orchestrator.handle_question(&session, question).await {
            Ok(answer) => {
                println!();
                println!("{}", answer);
                println!();
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}
