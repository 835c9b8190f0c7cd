//! Generate command: synthesize traces for a pattern and save them as JSON.

use crate::commands::{print_expected, write_file};
use anyhow::{Context, Result};
use dci_synth::{PatternCatalog, TraceSynthesizer};
use itertools::Itertools;
use std::path::PathBuf;
use tracing::info;

pub fn generate(
    catalog: &PatternCatalog,
    pattern: &str,
    count: usize,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let template = catalog.get(pattern)?;
    let output = output.unwrap_or_else(|| PathBuf::from(format!("traces_{}.json", pattern)));

    println!("Generating {} traces for pattern: {}", count, template.name());
    println!("Services: {}", template.services().iter().join(", "));
    println!("Call patterns: {}", template.call_patterns().len());

    let mut synthesizer = match seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            TraceSynthesizer::seeded(seed)
        }
        None => TraceSynthesizer::from_os_rng(),
    };
    let traces = synthesizer.generate(template, count)?;

    let json = serde_json::to_vec_pretty(&traces).context("Failed to serialize traces")?;
    write_file(&output, &json)?;
    println!("Generated {} traces in {}", traces.len(), output.display());

    println!();
    print_expected(template);

    Ok(())
}
