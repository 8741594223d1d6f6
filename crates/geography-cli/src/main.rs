//! geography: loader and query tool for geography-core
//!
//! Usage examples
//! --------------
//!
//! - Import every configured CSV source into the snapshot
//!   $ geography load
//!
//! - Re-import runways and frequencies only
//!   $ geography load --only runways,frequencies
//!
//! - Show what is in the snapshot
//!   $ geography stats
//!
//! - Lookups and range listings
//!   $ geography country nl
//!   $ geography airports --country NL --from-iata A --until-iata M
//!   $ geography runways EHAM --from-heading 180
//!   $ geography --json airport --iata AMS
//!
//! Configuration comes from `--config <options.json>` (or `./options.json`),
//! with `GEOGRAPHY_*` environment overrides. Logs go to stderr and honour
//! `RUST_LOG`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use geography_core::api::{AirportView, CountryView, FrequencyView, RegionView, RunwayView};
use geography_core::{import, Catalog, Entity, ImportReport, Settings};
use serde_json::json;
use tracing::{debug, warn};

/// Row errors printed per pass before the rest are summarised.
const SHOWN_ERRORS: usize = 10;

fn setup_logging(args: &CliArgs) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = args.log_level();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("geography={level},geography_core={level}"))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(report: &ImportReport, json: bool) -> anyhow::Result<()> {
    if json {
        let errors: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        return print_json(&json!({
            "entity": report.entity.topic(),
            "rows": report.rows,
            "imported": report.imported,
            "inserted": report.inserted,
            "replaced": report.replaced,
            "skipped": report.skipped,
            "failed": report.failed,
            "errors": errors,
        }));
    }

    println!("{report}");
    for error in report.errors.iter().take(SHOWN_ERRORS) {
        println!("  {error}");
    }
    if report.errors.len() > SHOWN_ERRORS {
        println!("  ... {} more", report.errors.len() - SHOWN_ERRORS);
    }
    Ok(())
}

fn open_catalog(settings: &Settings) -> anyhow::Result<Catalog> {
    let catalog = Catalog::load(&settings.database).with_context(|| {
        format!(
            "cannot open snapshot {} (run `geography load` first)",
            settings.database.display()
        )
    })?;
    Ok(catalog.with_max_results(settings.max_results))
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    setup_logging(&args);

    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if let Some(db) = &args.database {
        settings.database = db.clone();
    }
    debug!(?settings, "effective settings");
    let json = args.json;

    if let Commands::Load { only } = &args.command {
        let entities: Vec<Entity> = if only.is_empty() {
            Entity::ALL.to_vec()
        } else {
            only.iter().copied().map(Entity::from).collect()
        };

        let mut catalog = Catalog::open_or_default(&settings.database)?;
        let outcome = import::load(&mut catalog, &settings.source, &entities);
        // Rows applied before a source failure are kept, as with a live database.
        catalog.save(&settings.database)?;

        for report in &outcome.reports {
            print_report(report, json)?;
        }
        if let Some(err) = outcome.error {
            return Err(err.into());
        }
        return Ok(());
    }

    let catalog = open_catalog(&settings)?;
    let command = &args.command;

    match command {
        Commands::Load { .. } => {}

        Commands::Stats => {
            let stats = catalog.stats();
            if json {
                print_json(&stats)?;
            } else {
                println!("Snapshot statistics ({}):", settings.database.display());
                println!("  Countries:   {}", stats.countries);
                println!("  Regions:     {}", stats.regions);
                println!("  Airports:    {}", stats.airports);
                println!("  Runways:     {}", stats.runways);
                println!("  Frequencies: {}", stats.frequencies);
            }
        }

        Commands::Country { code } => {
            let c = catalog.country(code)?;
            if json {
                print_json(&CountryView::from(c))?;
            } else {
                println!("Country: {}", c.name);
                println!("ISO: {}", c.code);
                println!("Continent: {}", c.continent);
                if let Some(w) = &c.wikipedia {
                    println!("Wikipedia: {w}");
                }
                println!("Regions: {}", c.regions.len());
            }
        }

        Commands::Countries { range } => {
            let (from, until) = range.bounds();
            let countries = catalog.countries(from, until)?;
            if json {
                let views: Vec<CountryView> = countries.into_iter().map(CountryView::from).collect();
                print_json(&views)?;
            } else {
                for c in countries {
                    println!("{}  {} ({})", c.code, c.name, c.continent);
                }
            }
        }

        Commands::Regions { country, range } => {
            let (from, until) = range.bounds();
            let regions = catalog.regions(country.as_deref().unwrap_or_default(), from, until)?;
            if json {
                let views: Vec<RegionView> = regions.into_iter().map(RegionView::from).collect();
                print_json(&views)?;
            } else {
                for r in regions {
                    println!("{}  {}", r.region.code, r.region.name);
                }
            }
        }

        Commands::Airport { code, iata } => {
            let a = if *iata {
                catalog.airport_by_iata(code)?
            } else {
                catalog.airport(code)?
            };
            if json {
                print_json(&AirportView::from(a))?;
            } else {
                println!("Airport: {}", a.name);
                println!("ICAO: {}", a.code);
                println!("IATA: {}", a.iata.as_deref().unwrap_or("-"));
                println!("Type: {}", a.kind);
                println!("Position: {:.4}, {:.4}", a.latitude, a.longitude);
                match a.elevation {
                    Some(ft) => println!("Elevation: {ft} ft"),
                    None => println!("Elevation: unknown"),
                }
                println!("Country/Region: {} / {}", a.country_code, a.region_code);
                if let Some(m) = &a.municipality {
                    println!("Municipality: {m}");
                }
                println!("Runways: {}", a.runways.len());
                println!("Frequencies: {}", a.frequencies.len());
            }
        }

        Commands::Airports { .. } => {
            let filter = command.airport_filter().unwrap_or_default();
            let airports = catalog.airports(&filter)?;
            if json {
                let views: Vec<AirportView> = airports.into_iter().map(AirportView::from).collect();
                print_json(&views)?;
            } else {
                for a in airports {
                    println!(
                        "{:<4}  {:<3}  {}  ({}, {})",
                        a.code,
                        a.iata.as_deref().unwrap_or(""),
                        a.name,
                        a.municipality.as_deref().unwrap_or("-"),
                        a.region_code
                    );
                }
            }
        }

        Commands::Runways { icao, .. } => {
            let filter = command.runway_filter().unwrap_or_default();
            let runways = catalog.runways(icao, &filter)?;
            if json {
                let views: Vec<RunwayView> = runways.into_iter().map(RunwayView::from).collect();
                print_json(&views)?;
            } else if runways.is_empty() {
                warn!(icao = icao.as_str(), "no runway matches the filter");
            } else {
                for r in runways {
                    let heading = r.side.heading.map_or("-".to_owned(), |h| format!("{h:03}"));
                    println!(
                        "{:<4} / {:<4} hdg {:>3}  {} x {} ft  {}{}",
                        r.code(),
                        r.alternate_code().unwrap_or("-"),
                        heading,
                        r.runway.length,
                        r.runway.width,
                        r.runway.surface,
                        if r.runway.closed { "  (closed)" } else { "" }
                    );
                }
            }
        }

        Commands::Frequencies { icao, .. } => {
            let filter = command.frequency_filter().unwrap_or_default();
            let frequencies = catalog.frequencies(icao, &filter)?;
            if json {
                let views: Vec<FrequencyView> =
                    frequencies.into_iter().map(FrequencyView::from).collect();
                print_json(&views)?;
            } else if frequencies.is_empty() {
                warn!(icao = icao.as_str(), "no frequency matches the filter");
            } else {
                for f in frequencies {
                    println!(
                        "{:<6} {:>8.3} MHz  {}",
                        f.frequency.kind,
                        f.frequency.mhz,
                        f.frequency.description.as_deref().unwrap_or("")
                    );
                }
            }
        }

        Commands::Search { text } => {
            let hits = catalog.search(text)?;
            if json {
                let countries: Vec<CountryView> =
                    hits.countries.iter().copied().map(CountryView::from).collect();
                let airports: Vec<AirportView> =
                    hits.airports.iter().copied().map(AirportView::from).collect();
                print_json(&json!({ "countries": countries, "airports": airports }))?;
            } else {
                for c in &hits.countries {
                    println!("country  {}  {}", c.code, c.name);
                }
                for a in &hits.airports {
                    println!("airport  {}  {}", a.code, a.name);
                }
            }
        }
    }

    Ok(())
}
