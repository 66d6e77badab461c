use eyre::{bail, Result, WrapErr};
use pico_args::Arguments;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::cache::Cache;
use common::config::Config;
use common::domain::RelativeDate;
use common::provider::EnergyProvider;
use common::service::{JobOutcome, PriceService};

fn main() -> Result<()> {
    let mut args = Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        let bin = PathBuf::from(std::env::args_os().next().unwrap_or_default());
        let bin = bin.file_name().unwrap_or_default().to_string_lossy();
        println!("Usage: {bin} [--electricity] [--gas]");
        println!("Fetches and caches today's prices. Runs both jobs when no flag is given.");
        return Ok(());
    }
    let mut electricity = args.contains("--electricity");
    let mut gas = args.contains("--gas");
    if !electricity && !gas {
        electricity = true;
        gas = true;
    }
    let rest = args.finish();
    if !rest.is_empty() {
        bail!("Unexpected arguments: {:?}", rest);
    }

    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "energy_cron=info,common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().wrap_err("Invalid configuration")?;
    let provider = EnergyProvider::from_config(&config.api)
        .wrap_err("Unable to set up the price provider")?;
    let service = PriceService::new(provider, Cache::new(config.data_dir.clone()));

    if electricity {
        run_electricity(&service)?;
    }
    if gas {
        run_gas(&service)?;
    }
    Ok(())
}

fn run_electricity(service: &PriceService) -> Result<()> {
    let dates = [RelativeDate::Today, RelativeDate::Tomorrow].map(|date| date.to_naive_date());
    match service
        .run_electricity_job(&dates)
        .wrap_err("Electricity job failed")?
    {
        JobOutcome::Stored(dates) => {
            info!(?dates, "Electricity data stored");
            Ok(())
        }
        JobOutcome::NoData(date) => bail!("No electricity data available for {date}"),
    }
}

fn run_gas(service: &PriceService) -> Result<()> {
    let today = RelativeDate::Today.to_naive_date();
    match service.run_gas_job(today).wrap_err("Gas job failed")? {
        JobOutcome::Stored(_) => info!(%today, "Gas data stored"),
        JobOutcome::NoData(_) => info!(%today, "No gas data available, nothing stored"),
    }
    Ok(())
}
