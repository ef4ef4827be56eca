use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::level_filters::LevelFilter;

use crate::{
    tracker::{run_session, sink::OutputChannel},
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::{enable_logging, REPLAY_PREFIX, WATCH_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Devmirror", version, long_about = None)]
#[command(about = "Tracks editor activity and per-file time statistics", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(
        about = "Track a live session. Host events are read from stdin, report lines go to stdout"
    )]
    Watch {
        #[arg(
            long,
            help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
        )]
        dir: Option<PathBuf>,
    },
    #[command(about = "Feed a recorded event transcript through the tracker")]
    Replay {
        file: PathBuf,
        #[arg(long, help = "Print the session summary after the transcript ends")]
        summary: bool,
        #[arg(
            long,
            help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
        )]
        dir: Option<PathBuf>,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };

    match args.commands {
        Commands::Watch { dir } => {
            let dir = dir.map_or_else(create_application_default_path, Ok)?;
            enable_logging(WATCH_PREFIX, &dir, logging_level, args.log)?;
            let input = BufReader::new(tokio::io::stdin());
            run_session(
                input,
                OutputChannel::new(std::io::stdout()),
                DefaultClock,
                false,
            )
            .await
        }
        Commands::Replay { file, summary, dir } => {
            let dir = dir.map_or_else(create_application_default_path, Ok)?;
            enable_logging(REPLAY_PREFIX, &dir, logging_level, args.log)?;
            let input = BufReader::new(tokio::fs::File::open(file).await?);
            run_session(
                input,
                OutputChannel::new(std::io::stdout()),
                DefaultClock,
                summary,
            )
            .await
        }
    }
}
