//! Schema generation command implementation.

use crate::config::HomebrewConfig;
use anyhow::{Context, Result};
use schemars::schema_for;

pub fn run() -> Result<()> {
    let schema = schema_for!(HomebrewConfig);
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{json}");
    Ok(())
}
