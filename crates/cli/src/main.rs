use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use yatra_agents::{AssistantConfig, TravelAssistant};
use yatra_llm::LlmStack;
use yatra_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "yatra")]
#[command(about = "Indian travel assistant: weather, trains, roads and places")]
struct Cli {
    /// Base URL of the live weather/rail/road services.
    #[arg(long, env = "YATRA_COLLABORATOR_URL")]
    collaborator_url: Option<String>,

    /// Directory with weather.json, trains.json, routes.json and tourism.json.
    #[arg(long, env = "YATRA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Classify with rules and answer without generated prose.
    #[arg(long)]
    no_llm: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive conversation.
    Chat,
    /// Answer a single message.
    Ask {
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Show the classification and validation of a message.
    Classify {
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Summarise the loaded fallback datasets.
    Data,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("yatra_cli");
    let cli = Cli::parse();

    let assistant = build_assistant(&cli)?;

    match cli.command {
        Command::Chat => run_chat(&assistant).await?,
        Command::Ask { message } => {
            println!("{}", assistant.handle_message(&message.join(" ")).await);
        }
        Command::Classify { message } => {
            let outcome = assistant.classify(&message.join(" ")).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Data => {
            println!("{}", serde_json::to_string_pretty(&assistant.fallback().stats())?);
        }
    }

    Ok(())
}

fn build_assistant(cli: &Cli) -> Result<TravelAssistant> {
    let mut config = AssistantConfig::from_env();
    if let Some(url) = &cli.collaborator_url {
        config.collaborator_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let llm = if cli.no_llm {
        LlmStack::rules_only()
    } else {
        LlmStack::load_default()
    };

    TravelAssistant::from_config(&config, llm, AppMetrics::shared())
        .context("failed building travel assistant")
}

async fn run_chat(assistant: &TravelAssistant) -> Result<()> {
    println!("Indian Travel Assistant. Type 'exit' to quit or 'help' for assistance.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        let reply = assistant.handle_message(message).await;
        println!("\n{reply}\n");

        if ["exit", "quit", "bye"]
            .iter()
            .any(|word| message.eq_ignore_ascii_case(word))
        {
            break;
        }
    }

    Ok(())
}
