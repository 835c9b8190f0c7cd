//! Command implementations for the DCI CLI.

pub mod generate;
pub mod validate;

use anyhow::{Context, Result};
use dci_analysis::table::write_dci_results;
use dci_core::{ArchitectureTemplate, DciRow};
use dci_synth::{expected_dci, ExpectedCoupling, PatternCatalog};
use itertools::Itertools;
use std::fs;
use std::path::Path;

/// Patterns command: list the catalog.
pub fn patterns(catalog: &PatternCatalog) -> Result<()> {
    println!("Available patterns: {}", catalog.len());
    println!();

    if catalog.is_empty() {
        println!("No patterns registered.");
        return Ok(());
    }

    for template in catalog.iter() {
        println!("  {}", template.name());
        println!(
            "    Services ({}): {}",
            template.services().len(),
            template.services().iter().join(", ")
        );
        println!("    Call patterns: {}", template.call_patterns().len());
    }

    Ok(())
}

/// Expected command: print, and optionally save, the structural DCI of a pattern.
pub fn expected(catalog: &PatternCatalog, pattern: &str, output: Option<&Path>) -> Result<()> {
    let template = catalog.get(pattern)?;
    let expected = print_expected(template);

    if let Some(path) = output {
        let rows: Vec<DciRow> = expected.iter().map(ExpectedCoupling::to_row).collect();
        let mut buffer = Vec::new();
        write_dci_results(&mut buffer, &rows)?;
        write_file(path, &buffer)?;
        println!();
        println!("Expected DCI results written to {}", path.display());
    }

    Ok(())
}

/// Print the expected-coupling table and return it.
pub(crate) fn print_expected(template: &ArchitectureTemplate) -> Vec<ExpectedCoupling> {
    let expected = expected_dci(template);
    let max_possible = template.services().len().saturating_sub(1);

    println!("Expected DCI Analysis:");
    println!("Max possible couplings: {}", max_possible);
    println!();
    for e in &expected {
        println!(
            "{}: {}/{} = {:.3} ({})",
            e.service, e.distinct_callees, e.max_possible, e.dci, e.status
        );
    }

    expected
}

/// Write a fully rendered buffer in one go, so failed runs leave no partial files.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write several rendered buffers; if one fails, the ones already written are removed.
pub(crate) fn write_files(outputs: &[(&Path, Vec<u8>)]) -> Result<()> {
    for (index, (path, contents)) in outputs.iter().enumerate() {
        if let Err(e) = write_file(path, contents) {
            for (written, _) in &outputs[..index] {
                let _ = fs::remove_file(written);
            }
            return Err(e);
        }
    }
    Ok(())
}
