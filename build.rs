//! Build script: embeds the release version into the binary.

use std::process::Command;

fn main() {
    // Prefer HWCONFIG_VERSION if the release workflow sets it, otherwise
    // fall back to git describe for local builds.
    if let Ok(version) = std::env::var("HWCONFIG_VERSION") {
        println!("cargo:rustc-env=HWCONFIG_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=HWCONFIG_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=HWCONFIG_VERSION");
}
