//! Command-line argument definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the hardware configuration parser.
#[derive(Parser, Debug)]
#[command(
    name = "hwconfig",
    about = "Extract filesystems, boot settings and partition layouts from NixOS hardware configurations",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Repository root containing `hosts/` (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse hardware configurations and print the result as JSON
    Parse(ParseOpts),
    /// List hosts that have a configuration directory
    Hosts(HostsOpts),
    /// Print version information
    Version,
}

/// Options for the `parse` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ParseOpts {
    /// Host names to resolve under the repository root
    #[arg(value_name = "HOST", required_unless_present = "files")]
    pub hosts: Vec<String>,

    /// Parse an explicit file instead of (or in addition to) a host
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Emit compact single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Options for the `hosts` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct HostsOpts {}
