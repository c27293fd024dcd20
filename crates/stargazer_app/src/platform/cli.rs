use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use clap::{Parser, Subcommand};
use stargazer_core::{format_iso_date, FeedParams};

use super::config::DEFAULT_CONFIG_FILE;

/// Days after the start date covered by the default NEO window.
const NEO_WINDOW_DAYS: u64 = 6;
const DEFAULT_SOL: u32 = 1000;

/// Browse NASA open data from the terminal.
#[derive(Debug, Parser)]
#[command(name = "stargazer", version, about)]
pub struct Cli {
    /// Path to a RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// API key for api.nasa.gov (overrides config and NASA_API_KEY).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the raw (reshaped) JSON instead of a summary.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Astronomy Picture of the Day.
    Apod {
        /// YYYY-MM-DD; the upstream defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Near-Earth objects approaching in a date range.
    Neo {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Mars rover photos by sol or Earth date.
    Mars {
        #[arg(long, conflicts_with = "earth_date")]
        sol: Option<u32>,
        #[arg(long)]
        earth_date: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Picture of the day plus this week's near-Earth objects.
    Home {
        #[arg(long)]
        date: Option<String>,
    },
}

impl Command {
    /// Parameters for every feed this command shows, in display order.
    pub fn feed_params(&self, today: NaiveDate) -> Vec<FeedParams> {
        match self {
            Command::Apod { date } => vec![FeedParams::Apod { date: date.clone() }],
            Command::Neo {
                start_date,
                end_date,
            } => vec![neo_params(start_date.clone(), end_date.clone(), today)],
            Command::Mars {
                sol,
                earth_date,
                page,
            } => {
                let sol = match (sol, earth_date) {
                    (None, None) => Some(DEFAULT_SOL),
                    _ => *sol,
                };
                vec![FeedParams::MarsPhotos {
                    sol,
                    earth_date: earth_date.clone(),
                    page: *page,
                }]
            }
            Command::Home { date } => vec![
                FeedParams::Apod { date: date.clone() },
                neo_params(None, None, today),
            ],
        }
    }
}

/// With no bounds the window is `today ..= today + 6`; a single bound is
/// passed through so validation reports the missing one.
fn neo_params(start: Option<String>, end: Option<String>, today: NaiveDate) -> FeedParams {
    let (start_date, end_date) = match (start, end) {
        (None, None) => {
            let end = today
                .checked_add_days(Days::new(NEO_WINDOW_DAYS))
                .unwrap_or(today);
            (format_iso_date(today), format_iso_date(end))
        }
        (start, end) => (start.unwrap_or_default(), end.unwrap_or_default()),
    };
    FeedParams::NeoFeed {
        start_date,
        end_date,
    }
}
