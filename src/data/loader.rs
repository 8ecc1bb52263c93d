use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::error::{FormatError, LoadError};
use super::model::RecordFields;

/// Number of comma-separated fields in a record line.
pub const FIELD_COUNT: usize = 7;

// ---------------------------------------------------------------------------
// Resource sources
// ---------------------------------------------------------------------------

/// Yields the raw text of a named resource.
///
/// An absent resource must be reported as [`LoadError::ResourceMissing`];
/// the loader turns that into an empty line sequence.
pub trait ResourceSource {
    fn read(&self, name: &str) -> Result<String, LoadError>;
}

/// Resources stored as files below a root directory (the `assets/` folder
/// shipped next to the binary, or the folder of a file picked by the user).
#[derive(Debug, Clone)]
pub struct DirResources {
    root: PathBuf,
}

impl DirResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirResources { root: root.into() }
    }

    /// Full path a resource name resolves to.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ResourceSource for DirResources {
    fn read(&self, name: &str) -> Result<String, LoadError> {
        let path = self.path_of(name);
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::ResourceMissing(path.display().to_string()),
            _ => LoadError::Io {
                name: path.display().to_string(),
                source: e,
            },
        })
    }
}

/// In-memory resources, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    entries: HashMap<String, String>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.entries.insert(name.to_string(), text.to_string());
        self
    }
}

impl ResourceSource for MemoryResources {
    fn read(&self, name: &str) -> Result<String, LoadError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::ResourceMissing(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Load diagnostics
// ---------------------------------------------------------------------------

/// Statistics and skip reasons collected while loading one resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Name of the resource that was read.
    pub resource: String,
    /// Set when the resource could not be found or read.
    pub resource_missing: bool,
    /// Lines seen, including blank and malformed ones.
    pub total_lines: usize,
    pub skipped_lines: usize,
    /// `"Line <n>: Empty line"` or `"Line <n>: <raw text>"` per skipped line.
    pub skipped_details: Vec<String>,
}

impl LoadReport {
    pub fn valid_lines(&self) -> usize {
        self.total_lines - self.skipped_lines
    }

    /// One-line summary suitable for a status bar.
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} valid lines, skipped {} malformed lines out of {} total lines",
            self.valid_lines(),
            self.skipped_lines,
            self.total_lines
        )
    }

    fn skip(&mut self, detail: String) {
        self.skipped_lines += 1;
        self.skipped_details.push(detail);
    }
}

/// Cleaned, validated lines plus the diagnostics of the load.
#[derive(Debug, Clone, Default)]
pub struct LoadedLines {
    pub lines: Vec<String>,
    pub report: LoadReport,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a named resource and keep its valid lines.
///
/// Never fails: a missing or unreadable resource yields zero lines with
/// `report.resource_missing` set.
pub fn load_lines<S: ResourceSource + ?Sized>(source: &S, resource: &str) -> LoadedLines {
    match source.read(resource) {
        Ok(text) => {
            let mut loaded = load_text(&text);
            loaded.report.resource = resource.to_string();
            log::info!("{resource}: {}", loaded.report.summary());
            loaded
        }
        Err(e) => {
            log::warn!("{e}; continuing without external records");
            LoadedLines {
                lines: Vec::new(),
                report: LoadReport {
                    resource: resource.to_string(),
                    resource_missing: true,
                    ..LoadReport::default()
                },
            }
        }
    }
}

/// Split raw text into lines, cleaning and validating each one.
pub fn load_text(text: &str) -> LoadedLines {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut loaded = LoadedLines::default();

    for (idx, raw) in split_lines(text).enumerate() {
        let line_no = idx + 1;
        loaded.report.total_lines += 1;

        if raw.trim().is_empty() {
            loaded.report.skip(format!("Line {line_no}: Empty line"));
            continue;
        }

        let cleaned = clean_line(raw);
        match parse_fields(&cleaned) {
            Ok(_) => loaded.lines.push(cleaned),
            Err(reason) => {
                let err = LoadError::MalformedLine {
                    line: line_no,
                    raw: raw.to_string(),
                    reason,
                };
                log::warn!("Skipped {err}");
                loaded.report.skip(format!("Line {line_no}: {raw}"));
            }
        }
    }

    loaded
}

/// Split on `\n`, `\r\n` or a lone `\r`. A final terminator does not start
/// another line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix(&['\n', '\r'][..]))
        .unwrap_or(text);
    let mut rest = (!text.is_empty()).then_some(body);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(&['\n', '\r'][..]) {
            Some(at) => {
                let skip = if current[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[at + skip..]);
                Some(&current[..at])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Line cleaning and validation
// ---------------------------------------------------------------------------

/// Trim, drop one trailing comma, then drop one pair of surrounding quotes.
pub fn clean_line(raw: &str) -> String {
    let mut line = raw.trim();
    if let Some(stripped) = line.strip_suffix(',') {
        line = stripped;
    }
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        line = &line[1..line.len() - 1];
    }
    line.to_string()
}

pub fn is_valid_line(cleaned: &str) -> bool {
    parse_fields(cleaned).is_ok()
}

/// Split a cleaned line into its seven fields, stripping `kg`/`m` units.
///
/// Shared by the validator and the record factory so both apply the same
/// rules. Trailing empty fields are dropped before counting, so
/// `...,Water,,` still has seven fields.
pub fn parse_fields(line: &str) -> Result<RecordFields, FormatError> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }
    if fields.len() != FIELD_COUNT {
        return Err(FormatError::FieldCount(fields.len()));
    }

    Ok(RecordFields {
        name: non_empty(fields[0], "name")?,
        weight_kg: parse_with_unit(fields[1], "kg", "weight")?,
        height_m: parse_with_unit(fields[2], "m", "height")?,
        attack: parse_number(fields[3], "attack")?,
        defense: parse_number(fields[4], "defense")?,
        stamina: parse_number(fields[5], "stamina")?,
        category: non_empty(fields[6], "category")?,
    })
}

fn non_empty(field: &str, name: &'static str) -> Result<String, FormatError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Err(FormatError::EmptyField(name));
    }
    Ok(trimmed.to_string())
}

fn parse_with_unit(
    field: &str,
    unit: &'static str,
    name: &'static str,
) -> Result<f64, FormatError> {
    let trimmed = field.trim();
    let number = trimmed
        .strip_suffix(unit)
        .ok_or_else(|| FormatError::MissingUnit {
            field: name,
            unit,
            value: trimmed.to_string(),
        })?;
    parse_number(number, name)
}

fn parse_number(field: &str, name: &'static str) -> Result<f64, FormatError> {
    let trimmed = field.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormatError::InvalidNumber {
            field: name,
            value: trimmed.to_string(),
        })
}
