use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use genai_testapp::config::AppConfig;
use genai_testapp::runner::{self, Filter, Runner};
use genai_testapp::scenarios;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// List all scenario names and exit
    #[clap(long)]
    list: bool,
    /// Only run scenarios whose name or index contains this token
    filter: Option<String>,
    #[clap(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let scenarios = scenarios::registry();
    let mut stdout = io::stdout();

    if args.list {
        runner::list(&scenarios, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = AppConfig::from_env();
    if config.api_key.is_empty() {
        info!("OPENAI_API_KEY is not set; requests will be rejected");
    }

    let filter = Filter::new(args.filter.as_deref());
    let summary = Runner::new(&scenarios, &config, filter)
        .run(&mut stdout)
        .await?;

    Ok(ExitCode::from(summary.exit_code()))
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hyper=off,reqwest=off,{}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
