//! `networks` command: list known ad networks.

use anyhow::Result;
use serde_json::json;

use adlift_core::Platform;
use adlift_providers::NetworkRegistry;

use crate::{Cli, OutputFormat};

/// Lists every registered network and its sample unit IDs.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.format == OutputFormat::Json {
        let networks: Vec<_> = NetworkRegistry::all()
            .iter()
            .map(|desc| {
                json!({
                    "network": desc.id.cli_name(),
                    "display_name": desc.display_name(),
                    "test_unit_android": desc.test_unit_id(Platform::Android),
                    "test_unit_ios": desc.test_unit_id(Platform::Ios),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&networks)?);
        return Ok(());
    }

    for desc in NetworkRegistry::all() {
        println!(
            "{:<12} android: {:<40} ios: {}",
            desc.display_name(),
            desc.test_unit_id(Platform::Android).unwrap_or("-"),
            desc.test_unit_id(Platform::Ios).unwrap_or("-"),
        );
    }
    Ok(())
}
