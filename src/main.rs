//! Almanac CLI entry point.

use std::io::Write;

use almanac::{
    overview, ChatTurnProcessor, Config, DateResolver, Event, EventStore, ExtractionOrchestrator,
    JsonFilePersistence, WebhookAssistant,
};
use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Almanac: conversational calendar assistant
#[derive(Parser, Debug)]
#[command(name = "almanac")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with the assistant (default)
    Chat,
    /// List upcoming and recent past events
    Events,
    /// Delete all stored events
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(config).await,
        Command::Events => run_events(config).await,
        Command::Clear => run_clear(config).await,
    }
}

/// Interactive chat loop.
async fn run_chat(config: Config) -> anyhow::Result<()> {
    let store = EventStore::load(JsonFilePersistence::new(&config.data_dir())).await;
    let assistant =
        WebhookAssistant::new(&config.assistant.webhook_url, config.assistant.timeout_secs)?;
    let session_id = uuid::Uuid::new_v4().to_string();

    let mut processor = ChatTurnProcessor::new(
        assistant,
        ExtractionOrchestrator::new(),
        store,
        session_id,
    );

    println!("Chat with your calendar assistant. Type /quit to leave.");
    prompt()?;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            prompt()?;
            continue;
        }
        if message == "/quit" || message == "/exit" {
            break;
        }

        let outcome = processor.process(message).await;
        println!("{}", outcome.reply);
        if let Some(confirmation) = outcome.confirmation {
            println!("{confirmation}");
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

/// Print the events list: upcoming first, then the recent past.
async fn run_events(config: Config) -> anyhow::Result<()> {
    let store = EventStore::load(JsonFilePersistence::new(&config.data_dir())).await;
    let today = DateResolver::new().reference_iso();
    let view = overview(&store, &today);

    if view.is_empty() {
        println!("No events yet. Create one by chatting with your assistant!");
        return Ok(());
    }

    for event in &view.upcoming {
        print_event(event, false);
    }
    if !view.upcoming.is_empty() && !view.recent_past.is_empty() {
        println!("---");
    }
    for event in &view.recent_past {
        print_event(event, true);
    }

    Ok(())
}

fn print_event(event: &Event, past: bool) {
    let suffix = if past { " (past)" } else { "" };
    match &event.time {
        Some(time) => println!("{}  {} ({}){}", event.date, event.title, time, suffix),
        None => println!("{}  {}{}", event.date, event.title, suffix),
    }
}

/// Clear the persisted event store.
async fn run_clear(config: Config) -> anyhow::Result<()> {
    let mut store = EventStore::load(JsonFilePersistence::new(&config.data_dir())).await;
    let count = store.len();
    store.clear_all().await?;
    println!("Deleted {count} events.");
    Ok(())
}
