use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use energy_balance::config::{session_cookie, Cli, Command};
use energy_balance::{download_range, EnergyBalanceClient, QueryInstant};

async fn run(cli: &Cli) -> energy_balance::Result<usize> {
    let cookie = session_cookie()?;
    let client = EnergyBalanceClient::new(cookie, &cli.output_dir)?
        .with_host(&cli.host)
        .with_station(&cli.station);

    let files = match &cli.command {
        Command::Range { start, end } => {
            let end = end.as_deref().unwrap_or(start);
            download_range(&client, start, end, cli.delay()).await?
        }
        Command::Day { date } => {
            let query = QueryInstant::parse(date)?;
            vec![client.download_day(&query).await?]
        }
    };

    Ok(files.len())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("energy_balance=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(count) => {
            println!(
                "Downloaded {} files into '{}'",
                count,
                cli.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
