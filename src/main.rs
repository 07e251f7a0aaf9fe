use anyhow::{anyhow, Context, Result};
use bat::PrettyPrinter;
use clap::Parser;
use cliclack::spinner;
use console::style;
use serde_json::{json, Value};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use vision_agent::agent::VisionAgent;
use vision_agent::deployment::AgentDeployment;
use vision_agent::inputs::Request;
use vision_agent::providers::configs::OPENAI_API_KEY;

#[derive(Parser)]
#[command(author, version, about = "Ask a vision model about one or more images", long_about = None)]
struct Cli {
    /// Image URLs to ask about
    #[arg(required_unless_present = "input")]
    images: Vec<String>,

    /// Question to ask about the images
    #[arg(short, long)]
    question: Option<String>,

    /// Raw tool_input_data as JSON, instead of image arguments
    #[arg(long, conflicts_with_all = ["images", "question"])]
    input: Option<String>,

    /// Operation to run
    #[arg(long, default_value = "vision")]
    tool_name: String,

    /// Deployment file (json, toml or yaml)
    #[arg(short, long)]
    deployment: Option<PathBuf>,

    /// OpenAI API Key (can also be set via OPENAI_API_KEY environment variable)
    #[arg(short, long)]
    api_key: Option<String>,
}

impl Cli {
    fn tool_input_data(&self) -> Result<Value> {
        if let Some(raw) = &self.input {
            return serde_json::from_str(raw).context("--input must be valid JSON");
        }

        Ok(match (self.images.as_slice(), &self.question) {
            ([url], None) => json!(url),
            (images, None) => json!({ "images": images }),
            (images, Some(question)) => json!({ "images": images, "question": question }),
        })
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let deployment = AgentDeployment::load(cli.deployment.as_deref())
        .context("Failed to load deployment configuration")?;

    // Get API key from command line or environment variable
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| env::var(OPENAI_API_KEY).ok())
        .context("API key must be provided via --api-key or OPENAI_API_KEY environment variable")?;

    let agent = VisionAgent::new(deployment, api_key)?;
    let request = Request::new(cli.tool_name.clone(), cli.tool_input_data()?);

    println!(
        "{} {}",
        style("model").dim(),
        agent.deployment().llm_config.model
    );

    let spin = spinner();
    spin.start("awaiting reply");
    let result = agent.run(&request);
    spin.stop("");

    let answer = result?;
    render(&answer)?;
    println!();
    Ok(())
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .map_err(|e| anyhow!("Failed to render response: {}", e))?;
    Ok(())
}
