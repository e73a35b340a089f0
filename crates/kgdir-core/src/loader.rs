//! Reads knowledge-graph exports from disk.
//!
//! Accepts JSON Lines (one record per line) or a single JSON array of
//! records, from one file or from every `*.jsonl`/`*.json` file under a
//! directory. Malformed entries are skipped and reported; a load either
//! completes or yields nothing.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::traits::RecordSource;
use crate::types::RawRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `[` as the first non-whitespace byte means a JSON array, otherwise JSON Lines.
    #[default]
    Auto,
    Jsonl,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Line(usize),
    Element(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(n) => write!(f, "line {}", n),
            Self::Element(n) => write!(f, "element {}", n),
        }
    }
}

/// A skipped entry. Line numbers are 1-based, array elements 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseDiagnostic {
    pub source: PathBuf,
    pub location: Location,
    pub message: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.source.display(), self.location, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<RawRecord>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl LoadReport {
    fn extend(&mut self, other: LoadReport) {
        self.records.extend(other.records);
        self.diagnostics.extend(other.diagnostics);
    }
}

pub struct RecordLoader {
    path: PathBuf,
    format: InputFormat,
}

impl RecordLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into(), format: InputFormat::Auto } }

    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn load(&self) -> Result<LoadReport> {
        if !self.path.exists() {
            return Err(Error::NotFound(self.path.clone()));
        }
        let files = if self.path.is_dir() { list_data_files(&self.path) } else { vec![self.path.clone()] };
        info!(path = %self.path.display(), files = files.len(), "loading knowledge-graph records");
        let mut report = LoadReport::default();
        for file in &files {
            let content = read_file_content(file)?;
            report.extend(parse_str(&content, file, self.format)?);
        }
        if !report.diagnostics.is_empty() {
            warn!(skipped = report.diagnostics.len(), "some entries could not be parsed");
        }
        info!(records = report.records.len(), "loaded knowledge-graph records");
        Ok(report)
    }

    /// Like [`RecordLoader::load`], but a failed load is logged and becomes an
    /// empty report, indistinguishable from an empty export.
    pub fn load_or_empty(&self) -> LoadReport {
        self.load().unwrap_or_else(|e| {
            error!(error = %e, "failed to load knowledge-graph records");
            LoadReport::default()
        })
    }
}

impl RecordSource for RecordLoader {
    fn load_records(&self) -> Result<LoadReport> { self.load() }
}

/// Parse one document. `source` is only used to label diagnostics.
pub fn parse_str(content: &str, source: &Path, format: InputFormat) -> Result<LoadReport> {
    let content = content.trim_start_matches('\u{feff}');
    let format = match format {
        InputFormat::Auto if content.trim_start().starts_with('[') => InputFormat::Json,
        InputFormat::Auto => InputFormat::Jsonl,
        other => other,
    };
    debug!(source = %source.display(), ?format, "parsing document");
    match format {
        InputFormat::Json => parse_array(content, source),
        _ => Ok(parse_lines(content, source)),
    }
}

fn parse_array(content: &str, source: &Path) -> Result<LoadReport> {
    let elements: Vec<Value> = serde_json::from_str(content)
        .map_err(|e| Error::Parse { path: source.to_path_buf(), source: e })?;
    let mut report = LoadReport::default();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(element) {
            Ok(record) => report.records.push(record),
            Err(e) => skip(&mut report, source, Location::Element(index), e),
        }
    }
    Ok(report)
}

fn parse_lines(content: &str, source: &Path) -> LoadReport {
    let mut report = LoadReport::default();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() { continue; }
        match serde_json::from_str::<RawRecord>(line) {
            Ok(record) => report.records.push(record),
            Err(e) => skip(&mut report, source, Location::Line(index + 1), e),
        }
    }
    report
}

fn skip(report: &mut LoadReport, source: &Path, location: Location, e: serde_json::Error) {
    let diagnostic = ParseDiagnostic { source: source.to_path_buf(), location, message: e.to_string() };
    warn!(%diagnostic, "skipping malformed record");
    report.diagnostics.push(diagnostic);
}

fn read_file_content(path: &Path) -> Result<String> {
    let load_err = |e| Error::Load { path: path.to_path_buf(), source: e };
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(path).map_err(load_err)?).to_string()),
    }
}

fn list_data_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("jsonl" | "json")))
        .collect();
    files.sort();
    files
}
