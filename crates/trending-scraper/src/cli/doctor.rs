//! Environment readiness check.

use crate::renderer::chromium::find_chromium;
use anyhow::Result;
use std::path::Path;

/// Check that a Chromium binary can be found.
pub async fn run(explicit: Option<&Path>) -> Result<()> {
    println!("Trending Doctor");
    println!("===============");
    println!();

    // OS and architecture
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    if let Some(path) = explicit {
        if !path.exists() {
            println!("[!!] Configured Chromium path does not exist: {}", path.display());
        }
    }

    let chromium_path = find_chromium(explicit);
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!("[!!] Chromium NOT found on PATH."),
    }

    println!();
    if chromium_path.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
        println!("  Install Chrome/Chromium or set TRENDING_CHROMIUM_PATH.");
    }

    Ok(())
}
