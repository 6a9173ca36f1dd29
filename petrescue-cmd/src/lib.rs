//! Command implementations for the PetRescue CLI.
//!
//! Each subcommand drives the same API client and view controllers as the
//! web app, so validation and status rules are identical on both surfaces.

use std::io::Write;

use clap::Subcommand;
use petrescue_api::{ApiClient, CaseApi, ClientConfig};
use petrescue_core::{CaseStatus, StatusFilter};

pub mod cases;
pub mod report;

#[derive(Subcommand)]
pub enum Command {
    /// List reported cases
    List {
        /// Only show one status: open, in_progress or resolved
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },

    /// Print case counts per status
    Stats,

    /// Print heat zones over clusters of active cases
    Zones,

    /// Report a new case
    Report {
        /// What was seen and where
        #[arg(short, long)]
        description: String,

        /// Latitude in degrees
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Address to geocode when no coordinates are given
        #[arg(short, long, conflicts_with = "lat")]
        address: Option<String>,

        /// Photo to upload with the case
        #[arg(short, long)]
        image: Option<String>,
    },

    /// Move a case to its next status
    Advance {
        id: String,
    },

    /// Change fields of an existing case
    Edit {
        id: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,

        /// New status: open, in_progress or resolved
        #[arg(long)]
        status: Option<CaseStatus>,
    },

    /// Delete a case permanently
    Delete {
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Look up the coordinates of an address
    Geocode {
        address: String,
    },
}

/// Combine explicit flags with `PETRESCUE_API_URL` / `PETRESCUE_MAPS_KEY`.
pub fn resolve_config(api_url: Option<&str>, maps_key: Option<&str>) -> ClientConfig {
    let from_env = ClientConfig::from_env();
    let config = match api_url {
        Some(url) if !url.trim().is_empty() => {
            ClientConfig::new(url).with_maps_key(from_env.maps_api_key())
        }
        _ => from_env,
    };
    match maps_key {
        Some(key) if !key.trim().is_empty() => config.with_maps_key(key.trim()),
        _ => config,
    }
}

pub async fn run(config: ClientConfig, command: Command) -> anyhow::Result<()> {
    log::info!("Using backend at {}", config.api_base());
    let client = ApiClient::new(config);
    let mut out = std::io::stdout().lock();
    execute(&client, command, &mut out).await
}

/// Run one command against `api`, writing results to `out`.
pub async fn execute<A: CaseApi, W: Write>(
    api: &A,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::List { status } => cases::list(api, status, out).await,
        Command::Stats => cases::stats(api, out).await,
        Command::Zones => cases::zones(api, out).await,
        Command::Report {
            description,
            lat,
            lng,
            address,
            image,
        } => {
            let request = report::ReportRequest {
                description,
                coordinates: lat.zip(lng),
                address,
                image,
            };
            report::report(api, request, out).await
        }
        Command::Advance { id } => cases::advance(api, &id, out).await,
        Command::Edit {
            id,
            description,
            lat,
            lng,
            status,
        } => {
            let update = petrescue_core::CaseUpdate {
                description,
                latitude: lat,
                longitude: lng,
                image_url: None,
                status,
            };
            cases::edit(api, &id, update, out).await
        }
        Command::Delete { id, yes } => cases::delete(api, &id, yes, out).await,
        Command::Geocode { address } => report::geocode(api, &address, out).await,
    }
}
