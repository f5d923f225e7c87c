// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed NixOS configuration repository and a
// fluent builder so each integration test can lay out `hosts/` without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nixos_hwconfig::error::HwConfigError;
use nixos_hwconfig::hosts;
use nixos_hwconfig::parser::{self, ParseResult};
use nixos_hwconfig::settings::{SETTINGS_FILE, Settings};

/// An isolated configuration repository backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory acting as the repository root.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with an empty `hosts/` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("hosts")).expect("create hosts dir");
        Self { root }
    }

    /// Path to the repository root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Settings for this repository (defaults unless `hwconfig.toml` was written).
    pub fn settings(&self) -> Settings {
        Settings::load(self.root.path()).expect("load settings")
    }

    /// Resolve `host` and parse its document, the way `hwconfig parse` does.
    pub fn parse_host(&self, host: &str) -> Result<ParseResult, HwConfigError> {
        let settings = self.settings();
        let path = hosts::resolve_host(self.root.path(), host, &settings)?;
        Ok(parser::parse_file(&path)?)
    }

    /// Absolute path of a file inside the repository.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context backed by an empty repository.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `hosts/<host>/<relative>`.
    pub fn with_host_file(self, host: &str, relative: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join("hosts").join(host).join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create host dir");
        }
        std::fs::write(&path, content).expect("write host file");
        self
    }

    /// Write `content` to the standard `nixos/hardware-configuration.nix`
    /// location for `host`.
    pub fn with_host(self, host: &str, content: &str) -> Self {
        self.with_host_file(host, "nixos/hardware-configuration.nix", content)
    }

    /// Write `hwconfig.toml` at the repository root.
    pub fn with_settings(self, content: &str) -> Self {
        std::fs::write(self.ctx.root.path().join(SETTINGS_FILE), content)
            .expect("write settings file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
