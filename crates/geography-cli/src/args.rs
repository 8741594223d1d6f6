use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use geography_core::{AirportFilter, Entity, FrequencyFilter, RunwayFilter};
use std::path::PathBuf;

/// CLI arguments for the geography loader and query tool
#[derive(Debug, Parser)]
#[command(
    name = "geography",
    version,
    about = "Load geography reference data from CSV and query countries, regions and airports"
)]
pub struct CliArgs {
    /// Options file (default: ./options.json when present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overrides the configured database
    #[arg(short = 'd', long = "database", global = true)]
    pub database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import the CSV sources into the snapshot
    Load {
        /// Only these sources (comma-separated); dependency order is kept
        #[arg(long, value_delimiter = ',')]
        only: Vec<SourceArg>,
    },

    /// Show a summary of the snapshot contents
    Stats,

    /// Lookup a country by ISO code
    Country {
        /// Two-letter ISO code (e.g. NL)
        code: String,
    },

    /// List countries in a code range
    Countries {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// List regions, optionally of one country
    Regions {
        #[arg(long)]
        country: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Lookup an airport by ICAO (or IATA with --iata) code
    Airport {
        code: String,
        /// Treat CODE as an IATA code
        #[arg(long)]
        iata: bool,
    },

    /// List airports matching all given filters
    Airports {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        from_iata: Option<String>,
        #[arg(long)]
        until_iata: Option<String>,
    },

    /// List the runway ends of an airport
    Runways {
        /// ICAO code
        icao: String,
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        from_heading: Option<String>,
        #[arg(long)]
        until_heading: Option<String>,
        #[arg(long)]
        from_length: Option<String>,
        #[arg(long)]
        until_length: Option<String>,
        /// 0 = open only, 1 = closed only
        #[arg(long)]
        closed: Option<String>,
    },

    /// List the radio frequencies of an airport
    Frequencies {
        /// ICAO code
        icao: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Search country and airport names (accent-insensitive)
    Search { text: String },
}

/// Inclusive `--from`/`--until` code bounds.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    #[arg(long)]
    pub from: Option<String>,
    #[arg(long)]
    pub until: Option<String>,
}

impl RangeArgs {
    pub fn bounds(&self) -> (&str, &str) {
        (
            self.from.as_deref().unwrap_or_default(),
            self.until.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Countries,
    Regions,
    Airports,
    Runways,
    Frequencies,
}

impl From<SourceArg> for Entity {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Countries => Entity::Country,
            SourceArg::Regions => Entity::Region,
            SourceArg::Airports => Entity::Airport,
            SourceArg::Runways => Entity::Runway,
            SourceArg::Frequencies => Entity::Frequency,
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl Commands {
    /// The airport filter, for `airports`.
    pub fn airport_filter(&self) -> Option<AirportFilter> {
        match self {
            Commands::Airports {
                country,
                region,
                range,
                from_iata,
                until_iata,
            } => Some(AirportFilter {
                country: text(country),
                region: text(region),
                from: text(&range.from),
                until: text(&range.until),
                from_iata: text(from_iata),
                until_iata: text(until_iata),
            }),
            _ => None,
        }
    }

    /// The runway filter, for `runways`.
    pub fn runway_filter(&self) -> Option<RunwayFilter> {
        match self {
            Commands::Runways {
                range,
                from_heading,
                until_heading,
                from_length,
                until_length,
                closed,
                ..
            } => Some(RunwayFilter {
                from: text(&range.from),
                until: text(&range.until),
                from_heading: text(from_heading),
                until_heading: text(until_heading),
                from_length: text(from_length),
                until_length: text(until_length),
                closed: text(closed),
            }),
            _ => None,
        }
    }

    /// The frequency filter, for `frequencies`.
    pub fn frequency_filter(&self) -> Option<FrequencyFilter> {
        match self {
            Commands::Frequencies { range, .. } => Some(FrequencyFilter {
                from: text(&range.from),
                until: text(&range.until),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn load_only_accepts_a_list() {
        let args = CliArgs::parse_from(["geography", "load", "--only", "countries,regions"]);
        match args.command {
            Commands::Load { only } => assert_eq!(only, [SourceArg::Countries, SourceArg::Regions]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn airport_flags_build_the_filter() {
        let args = CliArgs::parse_from([
            "geography",
            "airports",
            "--country",
            "nl",
            "--from-iata",
            "A",
            "--json",
        ]);
        let filter = args.command.airport_filter().unwrap();
        assert_eq!(filter.country, "nl");
        assert_eq!(filter.from_iata, "A");
        assert!(filter.until.is_empty());
        assert!(args.json);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(CliArgs::parse_from(["geography", "stats"]).log_level(), "info");
        assert_eq!(CliArgs::parse_from(["geography", "-vv", "stats"]).log_level(), "trace");
        assert_eq!(CliArgs::parse_from(["geography", "-q", "stats"]).log_level(), "error");
    }
}
