//! Extract tasks from a brain dump with GroqBrain.
//!
//! Run with: cargo run -p groq-brain --example extract -- "pay rent tomorrow, gym at 7pm"
//!
//! Make sure to set environment variables in .env:
//!   GROQ_API_KEY - Groq API key for authentication

use brain_core::prompt::{extraction_prompt, ExtractionContext};
use groq_brain::{Brain, BrainRequest, GroqBrain};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let brain_dump = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "buy eggs, book dentist next monday and review the client proposal".to_string()
    };

    let brain = GroqBrain::from_env()?;
    println!("Brain: {} ({})", brain.name(), brain.config().model);

    let system = extraction_prompt(&ExtractionContext {
        local_time: "2026-10-18T09:00:00".to_string(),
        timezone: "UTC".to_string(),
    });

    let response = brain
        .process(BrainRequest::extract_tasks(system, brain_dump))
        .await?;

    println!("=== Response ===");
    println!("{}", response.text);
    println!("================");

    Ok(())
}
