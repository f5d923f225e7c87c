//! `hwconfig` command-line entry point.
use anyhow::Result;
use clap::Parser;

use nixos_hwconfig::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    match args.command {
        cli::Command::Parse(opts) => commands::parse::run(&args.global, &opts),
        cli::Command::Hosts(opts) => commands::hosts::run(&args.global, &opts),
        cli::Command::Version => commands::version::run(),
    }
}
