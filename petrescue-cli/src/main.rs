//! PetRescue CLI - list, report and manage stray animal cases.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "petrescue-cli",
    version,
    about = "Report and track stray animal cases from the terminal"
)]
struct Cli {
    /// Backend origin, e.g. http://localhost:8000
    #[arg(long, global = true, env = "PETRESCUE_API_URL")]
    api_url: Option<String>,

    /// Google Maps key used for geocoding
    #[arg(long, global = true, env = "PETRESCUE_MAPS_KEY", hide_env_values = true)]
    maps_key: Option<String>,

    #[command(subcommand)]
    command: petrescue_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = petrescue_cmd::resolve_config(cli.api_url.as_deref(), cli.maps_key.as_deref());
    petrescue_cmd::run(config, cli.command).await
}
