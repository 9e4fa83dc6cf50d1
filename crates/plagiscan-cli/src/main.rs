mod config;
mod display;
mod replay;

use std::io::{IsTerminal, Read};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use plagiscan_ai::{Analyzer, Checker, GeminiClient, GenerativeClient, Report};
use tracing_subscriber::EnvFilter;

use crate::config::Cli;
use crate::display::Style;
use crate::replay::ReplayClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("plagiscan v{}", env!("CARGO_PKG_VERSION"));

    let style = Style {
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    let text = read_input(&cli)?;
    if text.trim().is_empty() {
        anyhow::bail!("no text to analyze: input is empty");
    }

    let client: Arc<dyn GenerativeClient> = match &cli.reply {
        Some(path) => {
            let reply = std::fs::read_to_string(path)
                .with_context(|| format!("reading saved reply {}", path.display()))?;
            Arc::new(ReplayClient::new(reply))
        }
        None => match GeminiClient::from_credentials(&cli.credentials(), cli.gemini_config()).await {
            Ok(client) => {
                tracing::info!(model = client.model(), "gemini client ready");
                Arc::new(client)
            }
            Err(e) => fail(&cli, style, &e.to_string()),
        },
    };

    let mut checker = Checker::new(Analyzer::new(client, cli.policy()));
    match checker.check(&text).await {
        Report::Findings { scored, sources } => {
            if cli.json {
                println!("{}", display::findings_json(scored, sources)?);
            } else {
                print!("{}", display::render_findings(&text, scored, sources, style));
            }
            Ok(())
        }
        Report::Failed { message } => fail(&cli, style, message),
        Report::Idle => anyhow::bail!("no check was run"),
    }
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    match &cli.file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
    }
}

/// Print the error panel and exit with status 1.
fn fail(cli: &Cli, style: Style, message: &str) -> ! {
    if cli.json {
        match display::failure_json(message) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("{message}"),
        }
    } else {
        eprint!("{}", display::render_failure(message, style));
    }
    std::process::exit(1);
}
