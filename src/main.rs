use std::io::Write as _;

use clap::Parser;

use ripple::config::Config;
use ripple::stream::{StreamingResponseAccumulator, TurnOutcome};

#[derive(Parser)]
#[command(
    name = "ripple",
    about = "Terminal chat client for a streaming_generate inference endpoint"
)]
struct Cli {
    /// Model identifier to send (overrides RIPPLE_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Upper bound on generated tokens (overrides RIPPLE_MAX_TOKENS).
    #[arg(long)]
    max_tokens: Option<u64>,

    /// Inference endpoint base URL (overrides RIPPLE_API_URL).
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    let base_url = cli.base_url.unwrap_or(config.base_url);
    let model = cli.model.unwrap_or(config.model);
    let max_tokens = cli.max_tokens.unwrap_or(config.max_tokens);

    tracing::info!(base_url = %base_url, model = %model, max_tokens, "ripple starting");

    let accumulator = StreamingResponseAccumulator::new(base_url);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" {
            break;
        }

        // Fragments are cumulative, so print only the unseen tail. A turn
        // is awaited to completion before the next prompt, which is what
        // keeps turns from overlapping.
        let mut shown = String::new();
        let outcome = accumulator
            .run(
                message,
                Some(&model),
                |text| {
                    match text.strip_prefix(shown.as_str()) {
                        Some(tail) => print!("{tail}"),
                        None => print!("\n{text}"),
                    }
                    let _ = std::io::stdout().flush();
                    shown = text.to_string();
                },
                config.api_token.as_deref(),
                max_tokens,
            )
            .await;
        println!();

        if let TurnOutcome::GaveUp(reason) = outcome {
            tracing::warn!(?reason, "turn gave up");
        }
    }

    Ok(())
}
