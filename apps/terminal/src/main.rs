use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use quiz_core::{
    AuthWiring, ControllerOptions, HttpPuzzleSource, LocalIdentityProvider,
    QuizController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod presenter;

use config::{load_settings, Settings, CONFIG_FILE};
use input::{parse_line, InputCommand, HELP};
use presenter::TerminalPresenter;

#[derive(Parser, Debug)]
#[command(name = "banana-quiz", about = "Solve banana puzzles from the terminal")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    advance_delay_ms: Option<u64>,
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    /// Sign in under this name instead of playing as guest.
    #[arg(long)]
    user: Option<String>,
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(v) = &args.api_url {
        settings.api_url = v.clone();
    }
    if let Some(v) = args.advance_delay_ms {
        settings.advance_delay_ms = v;
    }
    if let Some(v) = args.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = &args.user {
        settings.user = Some(v.clone());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    apply_args(&mut settings, &args);
    let api_url = settings
        .validate()
        .context("invalid puzzle service settings")?;
    info!("banana quiz starting");

    let presenter = Arc::new(TerminalPresenter::stdout());

    let identity = Arc::new(LocalIdentityProvider::new());
    if let Some(user) = &settings.user {
        identity.sign_in(user).await.context("failed to sign in")?;
    }
    let auth = Arc::new(AuthWiring::new(identity, presenter.clone()));
    let auth_task = Arc::clone(&auth).spawn();

    let source = Arc::new(
        HttpPuzzleSource::new(api_url, settings.request_timeout())
            .context("failed to build puzzle service client")?,
    );
    info!(api_url = %source.api_url(), "puzzle source ready");
    let controller = QuizController::new(
        source,
        presenter.clone(),
        ControllerOptions {
            advance_delay: settings.advance_delay(),
            ..ControllerOptions::default()
        },
    );
    let handle = controller.handle();
    let quiz_task = tokio::spawn(controller.run());

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_line(&line) {
            InputCommand::Answer(text) => handle.submit_text(text)?,
            InputCommand::NewPuzzle => handle.new_puzzle()?,
            InputCommand::SignOut => auth.sign_out().await.context("failed to sign out")?,
            InputCommand::Help => println!("{HELP}"),
            InputCommand::Quit => break,
        }
    }

    let _ = handle.shutdown();
    quiz_task.await.context("quiz controller task failed")?;
    auth_task.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_loaded_settings() {
        let args = Args::parse_from([
            "banana-quiz",
            "--api-url",
            "http://127.0.0.1:8080/api.php",
            "--advance-delay-ms",
            "20",
            "--user",
            "bob",
        ]);
        let mut settings = Settings::default();
        apply_args(&mut settings, &args);

        assert_eq!(settings.api_url, "http://127.0.0.1:8080/api.php");
        assert_eq!(settings.advance_delay_ms, 20);
        assert_eq!(settings.user.as_deref(), Some("bob"));
        assert_eq!(settings.request_timeout_secs, None);
        assert_eq!(args.config, PathBuf::from(CONFIG_FILE));
    }
}
