//! CSV schemas for DCI results, reference data, and the comparison template.
//!
//! Inputs are validated when loaded: required columns must be present, every
//! cell must parse, scores must lie in `[0, 1]`, and service names must be
//! unique within a table. Any violation is reported as `Error::Input`.

use dci_core::{CouplingStatus, DciRow, Error, ReferenceRow, Result, Service, TemplateRow};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

pub const DCI_COLUMNS: [&str; 3] = ["Service", "DCI", "Status"];
pub const REFERENCE_COLUMNS: [&str; 2] = ["Service", "MCI_Afferent"];
pub const TEMPLATE_COLUMNS: [&str; 5] = ["Service", "DCI", "MCI_Afferent", "MCI_Efferent", "Notes"];

#[derive(Debug, Deserialize)]
struct DciRecord {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "DCI")]
    dci: f64,
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceRecord {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "MCI_Afferent")]
    mci_afferent: Option<f64>,
    #[serde(rename = "MCI_Efferent", default)]
    mci_efferent: Option<f64>,
}

/// Load a DCI results table (`Service,DCI,Status`).
pub fn read_dci_results<R: Read>(reader: R) -> Result<Vec<DciRow>> {
    let mut csv_reader = open_reader(reader, &DCI_COLUMNS)?;
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<DciRecord>().enumerate() {
        let line = index + 2;
        let record = record.map_err(|e| Error::Input(format!("row {}: {}", line, e)))?;
        let service = checked_service(record.service, line, &mut seen)?;
        let dci = checked_score("DCI", record.dci, line)?;
        let status = record
            .status
            .parse::<CouplingStatus>()
            .map_err(|e| Error::Input(format!("row {}: {}", line, inner_message(e))))?;

        rows.push(DciRow::new(service, dci, status));
    }

    debug!(rows = rows.len(), "loaded DCI results");
    Ok(rows)
}

/// Load a reference table (`Service,MCI_Afferent[,MCI_Efferent]`).
pub fn read_reference<R: Read>(reader: R) -> Result<Vec<ReferenceRow>> {
    let mut csv_reader = open_reader(reader, &REFERENCE_COLUMNS)?;
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<ReferenceRecord>().enumerate() {
        let line = index + 2;
        let record = record.map_err(|e| Error::Input(format!("row {}: {}", line, e)))?;
        let service = checked_service(record.service, line, &mut seen)?;

        rows.push(ReferenceRow {
            service,
            mci_afferent: record
                .mci_afferent
                .map(|v| checked_finite("MCI_Afferent", v, line))
                .transpose()?,
            mci_efferent: record
                .mci_efferent
                .map(|v| checked_finite("MCI_Efferent", v, line))
                .transpose()?,
        });
    }

    debug!(rows = rows.len(), "loaded reference data");
    Ok(rows)
}

pub fn read_dci_results_path(path: &Path) -> Result<Vec<DciRow>> {
    read_dci_results(open_file(path)?).map_err(|e| in_file(path, e))
}

pub fn read_reference_path(path: &Path) -> Result<Vec<ReferenceRow>> {
    read_reference(open_file(path)?).map_err(|e| in_file(path, e))
}

/// Write DCI results in the producer's format: three-decimal scores and long status labels.
pub fn write_dci_results<W: Write>(writer: W, rows: &[DciRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(DCI_COLUMNS).map_err(io::Error::from)?;
    for row in rows {
        csv_writer
            .write_record([
                row.service.to_string(),
                format!("{:.3}", row.dci),
                row.status.to_string(),
            ])
            .map_err(io::Error::from)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the comparison template with its blank reference columns.
pub fn write_comparison_template<W: Write>(writer: W, rows: &[TemplateRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        // serialize() derives the header from the first row
        csv_writer.write_record(TEMPLATE_COLUMNS).map_err(io::Error::from)?;
    }
    for row in rows {
        csv_writer.serialize(row).map_err(io::Error::from)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::Input(format!("cannot open {}: {}", path.display(), e)))
}

fn in_file(path: &Path, err: Error) -> Error {
    match err {
        Error::Input(msg) => Error::Input(format!("{}: {}", path.display(), msg)),
        other => other,
    }
}

fn open_reader<R: Read>(reader: R, required: &[&str]) -> Result<csv::Reader<R>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::Input(format!("cannot read header: {}", e)))?;
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Input(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )));
    }

    Ok(csv_reader)
}

fn checked_service(name: String, line: usize, seen: &mut HashSet<String>) -> Result<Service> {
    if name.is_empty() {
        return Err(Error::Input(format!("row {}: empty Service", line)));
    }
    if !seen.insert(name.clone()) {
        return Err(Error::Input(format!(
            "row {}: duplicate Service '{}'",
            line, name
        )));
    }
    Ok(Service::from(name))
}

fn checked_finite(column: &str, value: f64, line: usize) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Input(format!("row {}: {} is not a finite number", line, column)))
    }
}

fn checked_score(column: &str, value: f64, line: usize) -> Result<f64> {
    let value = checked_finite(column, value, line)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::Input(format!(
            "row {}: {} = {} is outside [0, 1]",
            line, column, value
        )))
    }
}

fn inner_message(err: Error) -> String {
    match err {
        Error::Input(msg) => msg,
        other => other.to_string(),
    }
}
