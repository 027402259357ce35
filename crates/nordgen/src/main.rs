mod app;
mod cli;
mod config;
mod error;

use std::io::{BufRead, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use nordvpn_api::NordClient;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{AppConfig, Mode};
use crate::error::AppError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the tables and results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,nordgen=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::from_cli(cli)?;

    let mut client = NordClient::new(config.timeout).map_err(AppError::Client)?;
    if let Some(url) = &config.api_url {
        tracing::info!(url = %url, "using custom api url");
        client = client.with_base_url(url);
    }

    let mut stdout = std::io::stdout().lock();

    match &config.mode {
        Mode::ListCountries => app::run_list_countries(&client, &mut stdout).await,
        Mode::Generate(generate) => {
            let paths = app::run_generate(
                generate,
                &client,
                &mut stdout,
                &mut prompt_selection,
                chrono::Utc::now(),
            )
            .await?;
            tracing::info!(
                count = paths.len(),
                dir = %generate.output_dir.display(),
                "configs written"
            );
            Ok(())
        }
    }
}

/// Read one selection line from the terminal; piped input gets the default.
fn prompt_selection() -> std::io::Result<String> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut stdout = std::io::stdout();
    write!(stdout, "Select servers [Enter = best 3, 'best N', 'all', or 1,3,5]: ")?;
    stdout.flush()?;

    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line)
}
