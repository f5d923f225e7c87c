//! NixOS hardware configuration parser.
//!
//! Reads a `hardware-configuration.nix` style document and extracts the
//! facts an installer needs to reproduce the machine: filesystem mounts,
//! boot loader settings, nixos-hardware module imports and an inferred
//! partition layout (UEFI or BIOS).
//!
//! The public API is organised into four layers:
//!
//! - **[`parser`]** — pure text collectors and partition inference
//! - **[`hosts`]** / **[`settings`]** — mapping host names to documents
//! - **[`error`]** — typed failures (only loading and lookup can fail)
//! - **[`commands`]** — top-level subcommand orchestration (`parse`, `hosts`, `version`)
//!
//! Only the narrow set of literal shapes these facts use is understood; the
//! Nix language itself is not evaluated.
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod parser;
pub mod settings;
