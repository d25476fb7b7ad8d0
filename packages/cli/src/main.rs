#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Composite risk assessment for a single site.
//!
//! ```text
//! risk_insight assess --lat 48.8566 --lon 2.3522 --building-type commercial --value 1500000
//! risk_insight assess --lat 43.3 --lon 5.37 --building-type logistics --value 4e6 --report
//! risk_insight services
//! ```
//!
//! API keys are read from `OPENWEATHER_API_KEY`, `CATNAT_API_KEY`,
//! `EMDAT_API_KEY` and `VULNERABILITY_API_KEY`. Any source without a key
//! is replaced by synthetic data.

use clap::{Parser, Subcommand};
use risk_insight_aggregator::RiskAggregator;
use risk_insight_risk_models::{BuildingType, GeoPoint, InvalidInputError, SiteProfile};
use risk_insight_source::{ProvidersConfig, ServiceSettings, service_registry};

#[derive(Parser)]
#[command(name = "risk_insight", about = "Composite physical-risk scoring for a building site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one site and print the result as JSON
    Assess {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Building type (residential, commercial, industrial, agricultural, public, logistics)
        #[arg(long, value_parser = parse_building_type)]
        building_type: BuildingType,
        /// Building value in currency units
        #[arg(long)]
        value: f64,
        /// Use synthetic data only, even when API keys are set
        #[arg(long)]
        offline: bool,
        /// Include per-provider detail alongside the composite result
        #[arg(long)]
        report: bool,
    },
    /// List the external services and whether they are configured
    Services,
}

fn parse_building_type(s: &str) -> Result<BuildingType, String> {
    s.parse().map_err(|_| {
        let known: Vec<&str> = BuildingType::all().iter().map(AsRef::as_ref).collect();
        format!("unknown building type '{s}' (expected one of: {})", known.join(", "))
    })
}

fn site_input(
    lat: f64,
    lon: f64,
    building_type: BuildingType,
    value: f64,
) -> Result<(GeoPoint, SiteProfile), InvalidInputError> {
    Ok((GeoPoint::new(lat, lon)?, SiteProfile::new(building_type, value)?))
}

/// Ids of the services that will be queried live.
fn live_services(config: &ProvidersConfig) -> Vec<&str> {
    config
        .all()
        .into_iter()
        .filter(|s| s.is_configured())
        .map(ServiceSettings::id)
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            lat,
            lon,
            building_type,
            value,
            offline,
            report,
        } => {
            let (point, site) = match site_input(lat, lon, building_type, value) {
                Ok(input) => input,
                Err(e) => {
                    eprintln!("Invalid input: {e}");
                    std::process::exit(2);
                }
            };

            let config = if offline {
                ProvidersConfig::offline()?
            } else {
                ProvidersConfig::from_env()?
            };
            let live = live_services(&config);
            if live.is_empty() {
                log::info!("Assessing ({lat}, {lon}) with synthetic data only");
            } else {
                log::info!(
                    "Assessing ({lat}, {lon}) with live services: {}",
                    live.join(", ")
                );
            }

            let aggregator = RiskAggregator::from_config(&config);

            let json = if report {
                serde_json::to_string_pretty(&aggregator.assess(point, site).await)?
            } else {
                serde_json::to_string_pretty(
                    &aggregator.compute_comprehensive_risk(point, site).await,
                )?
            };
            println!("{json}");
        }
        Commands::Services => {
            let config = ProvidersConfig::from_env()?;

            println!("{:<16} {:<12} {:<40} NAME", "ID", "STATUS", "BASE URL");
            println!("{}", "-".repeat(100));

            for definition in service_registry::all_services() {
                let settings = config.all().into_iter().find(|s| s.id() == definition.id);
                let status = settings.map_or("unused", |s| {
                    if s.is_configured() { "live" } else { "synthetic" }
                });
                let base_url =
                    settings.map_or(definition.base_url.as_str(), |s| s.base_url.as_str());

                println!(
                    "{:<16} {:<12} {:<40} {}",
                    definition.id, status, base_url, definition.name
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            site_input(91.0, 2.0, BuildingType::Residential, 100_000.0).unwrap_err(),
            InvalidInputError::Latitude(91.0)
        );
    }

    #[test]
    fn rejects_non_positive_value() {
        assert!(matches!(
            site_input(45.0, 2.0, BuildingType::Public, 0.0),
            Err(InvalidInputError::BuildingValue(_))
        ));
    }

    #[test]
    fn offline_mode_has_no_live_services() {
        assert!(live_services(&ProvidersConfig::offline().unwrap()).is_empty());
    }

    #[test]
    fn configured_keys_are_live() {
        let config = ProvidersConfig::from_lookup(|name| {
            (name == "OPENWEATHER_API_KEY" || name == "EMDAT_API_KEY").then(|| "k".to_string())
        })
        .unwrap();
        assert_eq!(live_services(&config), vec!["openweathermap", "emdat"]);
    }

    #[test]
    fn parses_assess_arguments() {
        let cli = Cli::try_parse_from([
            "risk_insight",
            "assess",
            "--lat",
            "47.2184",
            "--lon",
            "-1.5536",
            "--building-type",
            "Industrial",
            "--value",
            "2500000",
            "--offline",
        ])
        .unwrap();

        let Commands::Assess {
            lon,
            building_type,
            offline,
            report,
            ..
        } = cli.command
        else {
            panic!("expected assess");
        };
        assert!((lon + 1.5536).abs() < f64::EPSILON);
        assert_eq!(building_type, BuildingType::Industrial);
        assert!(offline);
        assert!(!report);
    }

    #[test]
    fn unknown_building_type_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "risk_insight",
                "assess",
                "--lat",
                "45",
                "--lon",
                "5",
                "--building-type",
                "castle",
                "--value",
                "1",
            ])
            .is_err()
        );
    }
}
