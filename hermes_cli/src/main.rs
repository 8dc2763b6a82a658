use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{route::RouteArgs, verify::VerifyArgs};

mod file_utils;
mod parsers;
mod route;
mod verify;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Routes between two coordinates and prints the response as JSON
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Checks the Monaco reference route
    Verify {
        #[command(flatten)]
        args: VerifyArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Route { args }) => route::run(args)?,
        Some(Commands::Verify { args }) => verify::run(args)?,
        None => {}
    }

    Ok(())
}
