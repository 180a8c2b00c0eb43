//! Census CLI - explore district census chart views from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "census-cli",
    version,
    about = "District census dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: census_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    census_cmd::run(cli.command)
}
