//! `tubefetch validate` – print the canonical form of a URL.

use anyhow::Result;
use tubefetch_core::url_model;

pub fn run_validate(url: &str) -> Result<()> {
    let validated = url_model::validate(url)?;
    println!("{:<6} {}", "KIND", validated.kind);
    println!("{:<6} {}", "ID", validated.id);
    println!("{:<6} {}", "URL", validated.canonical_url);
    Ok(())
}
