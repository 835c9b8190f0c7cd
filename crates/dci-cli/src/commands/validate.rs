//! Validate command: analyze DCI results and compare them with reference data.

use crate::commands::write_files;
use anyhow::{Context, Result};
use dci_analysis::table::{
    read_dci_results_path, read_reference_path, write_comparison_template,
};
use dci_analysis::{Comparator, Report};
use dci_core::Error;
use std::path::Path;
use tracing::warn;

pub fn validate(
    dci_path: &Path,
    reference_path: Option<&Path>,
    threshold: f64,
    template_out: &Path,
    json_out: Option<&Path>,
) -> Result<()> {
    let rows = read_dci_results_path(dci_path)
        .with_context(|| format!("Failed to load DCI results from {}", dci_path.display()))?;

    let mut report = Report::from_rows(&rows)
        .with_context(|| format!("No DCI rows in {}", dci_path.display()))?;
    println!("Loaded DCI results from {}", dci_path.display());
    println!("  Services analyzed: {}", report.summary.count);
    println!("  Average DCI score: {:.3}", report.summary.mean);
    println!();

    if let Some(reference_path) = reference_path {
        let reference = read_reference_path(reference_path).with_context(|| {
            format!("Failed to load reference data from {}", reference_path.display())
        })?;

        match Comparator::new(threshold).compare(&rows, &reference) {
            Ok(comparison) => report = report.with_comparison(comparison),
            Err(e @ Error::JoinMismatch { .. }) => {
                warn!("{}", e);
                report = report.with_join_mismatch(e.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }

    print!("{}", report.to_text());

    // Render every output before touching the filesystem.
    let mut outputs: Vec<(&Path, Vec<u8>)> = Vec::new();
    if let Some(path) = json_out {
        outputs.push((path, report.to_json()?.into_bytes()));
    }
    if reference_path.is_none() {
        let template = Comparator::build_template(&rows);
        let mut buffer = Vec::new();
        write_comparison_template(&mut buffer, &template)?;
        outputs.push((template_out, buffer));
    }
    write_files(&outputs)?;

    if let Some(path) = json_out {
        println!();
        println!("JSON report written to {}", path.display());
    }

    if reference_path.is_none() {
        println!();
        println!("Created MCI comparison template: {}", template_out.display());
        println!("  Fill in the MCI values and run again:");
        println!(
            "  dci validate {} {}",
            dci_path.display(),
            template_out.display()
        );
    }

    Ok(())
}
