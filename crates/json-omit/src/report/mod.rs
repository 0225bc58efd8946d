//! Size report over fixture batches.
//!
//! Loads two fixture files (a deduplicated batch and one with duplicates),
//! prunes every item, prints byte-size statistics for all four datasets and
//! writes them out as minified JSON.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use json_omit_util::json_size_all;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::spec::{OmitSpec, SpecifierError};

/// Specifiers applied when none are given.
pub const DEFAULT_KEYS: &[&str] = &[
    "enforcement",
    "jwplayer",
    "mimes",
    "protocols",
    "regs",
    "renderer",
    "rtd",
    "schain",
    "segments",
    "site.content",
    "site.ext",
    "sizes",
    "user.data",
    "user.ext",
];

pub const DEFAULT_BATCH_SIZE: usize = 40;

pub const DEDUPED_FILE: &str = "deduped-data.json";
pub const DUPED_FILE: &str = "duped-data.json";
pub const DEDUPED_OMITTED_FILE: &str = "deduped-data-omitted.json";
pub const DUPED_OMITTED_FILE: &str = "duped-data-omitted.json";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read fixture {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse fixture {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("fixture {} is not a JSON array", .path.display())]
    NotAnArray { path: PathBuf },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Specifier(#[from] SpecifierError),
}

/// Inputs for [`run_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub deduped: PathBuf,
    pub with_dupes: PathBuf,
    pub out_dir: PathBuf,
    pub keys: Vec<String>,
    pub batch_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            deduped: PathBuf::from("data-deduped.json"),
            with_dupes: PathBuf::from("data-with-dupes.json"),
            out_dir: PathBuf::from("output"),
            keys: DEFAULT_KEYS.iter().map(|k| k.to_string()).collect(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Spread one level of nested arrays: `[[a, b], c, [d]]` becomes `[a, b, c, d]`.
///
/// Returns `None` if `value` is not an array.
pub fn flatten_one_level(value: Value) -> Option<Vec<Value>> {
    let Value::Array(items) = value else {
        return None;
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    Some(out)
}

/// Read a fixture file holding a JSON array and flatten it one level.
pub fn load_fixture(path: &Path) -> Result<Vec<Value>, ReportError> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let items = flatten_one_level(value).ok_or_else(|| ReportError::NotAnArray {
        path: path.to_path_buf(),
    })?;
    info!(path = %path.display(), items = items.len(), "loaded fixture");
    Ok(items)
}

/// Prune each item independently.
pub fn omit_all(items: &[Value], spec: &OmitSpec) -> Vec<Value> {
    items.iter().map(|item| spec.apply(item)).collect()
}

/// Format a byte count as kilobytes with two decimals, e.g. `"2.00KB"`.
///
/// Ties round up (`128` bytes is `"0.13KB"`), unlike `{:.2}` alone.
pub fn format_bytes_to_kb(bytes: f64) -> String {
    let hundredths = (bytes / 1024.0 * 100.0 + 0.5).floor();
    format!("{:.2}KB", hundredths / 100.0)
}

/// Serialized-size statistics for a batch of items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeStats {
    pub num_items: usize,
    /// Compact JSON size of the whole batch, in bytes.
    pub stringified_length: usize,
    pub avg_size_of_item: f64,
    pub avg_size_per_batch: f64,
    pub batch_size: usize,
}

impl SizeStats {
    pub fn measure(items: &[Value], batch_size: usize) -> Self {
        let stringified_length = json_size_all(items);
        let avg_size_of_item = if items.is_empty() {
            0.0
        } else {
            stringified_length as f64 / items.len() as f64
        };
        Self {
            num_items: items.len(),
            stringified_length,
            avg_size_of_item,
            avg_size_per_batch: avg_size_of_item * batch_size as f64,
            batch_size,
        }
    }

    pub fn to_summary(&self) -> SizeSummary {
        SizeSummary {
            num_items: self.num_items,
            stringified_length: format_bytes_to_kb(self.stringified_length as f64),
            avg_size_of_item: format_bytes_to_kb(self.avg_size_of_item),
            avg_size_per_batch: format_bytes_to_kb(self.avg_size_per_batch),
            batch_size: self.batch_size,
        }
    }
}

/// Human-readable form of [`SizeStats`], serialized as
/// `{"numItems", "stringifiedLength", "avgSizeOfItem", "avgSizePerBatchOf<N>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSummary {
    pub num_items: usize,
    pub stringified_length: String,
    pub avg_size_of_item: String,
    pub avg_size_per_batch: String,
    pub batch_size: usize,
}

impl Serialize for SizeSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("numItems", &self.num_items)?;
        map.serialize_entry("stringifiedLength", &self.stringified_length)?;
        map.serialize_entry("avgSizeOfItem", &self.avg_size_of_item)?;
        map.serialize_entry(
            &format!("avgSizePerBatchOf{}", self.batch_size),
            &self.avg_size_per_batch,
        )?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportBlock {
    pub label: &'static str,
    pub stats: SizeStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub blocks: Vec<ReportBlock>,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
}

impl Report {
    /// Console text: one `<label>:<pretty JSON>` block per dataset.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for block in &self.blocks {
            let summary = serde_json::to_string_pretty(&block.stats.to_summary())?;
            out.push_str(block.label);
            out.push(':');
            out.push_str(&summary);
            out.push('\n');
        }
        Ok(out)
    }
}

fn write_minified(dir: &Path, name: &str, items: &[Value]) -> Result<PathBuf, ReportError> {
    let path = dir.join(name);
    let bytes = serde_json::to_vec(items)?;
    fs::write(&path, &bytes).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(path)
}

/// Load both fixtures, prune them, measure all four datasets and write
/// them to `config.out_dir`.
pub fn run_report(config: &ReportConfig) -> Result<Report, ReportError> {
    let spec = OmitSpec::new(&config.keys)?;

    let deduped = load_fixture(&config.deduped)?;
    let duped = load_fixture(&config.with_dupes)?;

    let deduped_omitted = omit_all(&deduped, &spec);
    let duped_omitted = omit_all(&duped, &spec);

    let batch = config.batch_size;
    let blocks = vec![
        ReportBlock {
            label: "Duped data",
            stats: SizeStats::measure(&duped, batch),
        },
        ReportBlock {
            label: "Duped data with keys omitted",
            stats: SizeStats::measure(&duped_omitted, batch),
        },
        ReportBlock {
            label: "Deduped data",
            stats: SizeStats::measure(&deduped, batch),
        },
        ReportBlock {
            label: "Deduped data with keys omitted",
            stats: SizeStats::measure(&deduped_omitted, batch),
        },
    ];

    fs::create_dir_all(&config.out_dir).map_err(|source| ReportError::Write {
        path: config.out_dir.clone(),
        source,
    })?;
    let written = vec![
        write_minified(&config.out_dir, DEDUPED_FILE, &deduped)?,
        write_minified(&config.out_dir, DUPED_FILE, &duped)?,
        write_minified(&config.out_dir, DEDUPED_OMITTED_FILE, &deduped_omitted)?,
        write_minified(&config.out_dir, DUPED_OMITTED_FILE, &duped_omitted)?,
    ];
    info!(out_dir = %config.out_dir.display(), files = written.len(), "report written");

    Ok(Report { blocks, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_one_level() {
        let flat = flatten_one_level(json!([[1, 2], 3, [[4]], []])).unwrap();
        assert_eq!(flat, vec![json!(1), json!(2), json!(3), json!([4])]);
    }

    #[test]
    fn test_flatten_rejects_non_array() {
        assert_eq!(flatten_one_level(json!({"a": 1})), None);
        assert_eq!(flatten_one_level(json!("x")), None);
    }

    #[test]
    fn test_format_bytes_to_kb() {
        assert_eq!(format_bytes_to_kb(0.0), "0.00KB");
        assert_eq!(format_bytes_to_kb(2048.0), "2.00KB");
        assert_eq!(format_bytes_to_kb(1536.0), "1.50KB");
        assert_eq!(format_bytes_to_kb(100.0), "0.10KB");
    }

    #[test]
    fn test_format_bytes_to_kb_rounds_ties_up() {
        assert_eq!(format_bytes_to_kb(128.0), "0.13KB");
        assert_eq!(format_bytes_to_kb(640.0), "0.63KB");
        assert_eq!(format_bytes_to_kb(1152.0), "1.13KB");
    }

    #[test]
    fn test_measure() {
        // [{"a":1},{"a":1}] is 17 bytes
        let items = vec![json!({"a": 1}), json!({"a": 1})];
        let stats = SizeStats::measure(&items, 40);
        assert_eq!(stats.num_items, 2);
        assert_eq!(stats.stringified_length, 17);
        assert_eq!(stats.avg_size_of_item, 8.5);
        assert_eq!(stats.avg_size_per_batch, 340.0);
    }

    #[test]
    fn test_measure_empty_batch() {
        let stats = SizeStats::measure(&[], 40);
        assert_eq!(stats.num_items, 0);
        assert_eq!(stats.stringified_length, 2);
        assert_eq!(stats.avg_size_of_item, 0.0);
        assert_eq!(stats.avg_size_per_batch, 0.0);
    }

    #[test]
    fn test_summary_serialization() {
        let stats = SizeStats {
            num_items: 3,
            stringified_length: 3072,
            avg_size_of_item: 1024.0,
            avg_size_per_batch: 10240.0,
            batch_size: 10,
        };
        let value = serde_json::to_value(stats.to_summary()).unwrap();
        assert_eq!(
            value,
            json!({
                "numItems": 3,
                "stringifiedLength": "3.00KB",
                "avgSizeOfItem": "1.00KB",
                "avgSizePerBatchOf10": "10.00KB",
            })
        );
    }

    #[test]
    fn test_render() {
        let report = Report {
            blocks: vec![ReportBlock {
                label: "Duped data",
                stats: SizeStats::measure(&[json!(1)], 40),
            }],
            written: vec![],
        };
        let text = report.render().unwrap();
        assert_eq!(
            text,
            "Duped data:{\n  \"numItems\": 1,\n  \"stringifiedLength\": \"0.00KB\",\n  \"avgSizeOfItem\": \"0.00KB\",\n  \"avgSizePerBatchOf40\": \"0.12KB\"\n}\n"
        );
    }

    #[test]
    fn test_omit_all_is_per_item() {
        let spec = OmitSpec::new(["k"]).unwrap();
        let items = vec![json!({"k": 1}), json!({"k": 1, "v": 2}), json!(7)];
        assert_eq!(
            omit_all(&items, &spec),
            vec![json!({}), json!({"v": 2}), json!(7)]
        );
    }

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.batch_size, 40);
        assert_eq!(config.keys.len(), DEFAULT_KEYS.len());
        assert!(OmitSpec::new(&config.keys).is_ok());
    }
}
