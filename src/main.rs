use chrono::NaiveDate;
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use dam_levels::config::{Config, HEADER_LINES};

/// Clean the Western Cape dam levels export into storage and fullness per dam.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// "Dam levels update 2012-2018.csv" as downloaded from the city's open data portal
    input: PathBuf,

    /// Output CSV, defaults to dam_levels_cleaned.csv next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Drop rows dated after this day (YYYY-MM-DD), defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Lines above the first data row
    #[arg(long, default_value_t = HEADER_LINES)]
    header_lines: usize,
}

impl Args {
    fn into_config(self) -> Config {
        let output = self
            .output
            .unwrap_or_else(|| Config::default_output_for(&self.input));
        let mut config = Config::new(self.input, output).with_header_lines(self.header_lines);
        if let Some(today) = self.today {
            config = config.with_today(today);
        }
        config
    }
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config();
    match dam_levels::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
