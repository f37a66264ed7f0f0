// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Output sinks for generated views.
//!
//! | Sink | Destination | Collision check |
//! |------|-------------|-----------------|
//! | [`MemorySink`] | in-memory map, e.g. for `OUT_DIR/views.rs` | `(package, name)` key |
//! | [`DirSink`] | one file per view under a root directory | claimed path, then a staged file persisted without clobbering |
//!
//! Sinks are shared by every scene of a run, so they take `&self` and
//! serialize access internally.

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    io::{self, Write},
    path::{Path, PathBuf}
};

use convert_case::{Case, Casing};
use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{error::EmissionError, utils::marker};

/// A rendered view ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Target module path.
    pub package: String,
    /// View type name.
    pub name:    String,
    /// Qualified source type.
    pub source:  String,
    /// Modules the code glob-imports.
    pub imports: Vec<String>,
    /// Rendered items.
    pub code:    String
}

impl GeneratedUnit {
    /// File name of a standalone file (`OrderSummaryView` -> `order_summary_view.rs`).
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name.to_case(Case::Snake))
    }

    /// Standalone file contents: header, imports, code.
    pub fn contents(&self) -> String {
        let mut out = String::from(marker::HEADER);
        out.push('\n');
        for import in &self.imports {
            out.push_str(&marker::import(import));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.code);
        out.push('\n');
        out
    }
}

/// Destination of generated views.
pub trait OutputSink: Send + Sync {
    /// Persist one unit. A name may be written only once.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionError::Collision`] for a name already written and
    /// [`EmissionError::Io`] when persisting fails.
    fn write(&self, unit: GeneratedUnit) -> Result<(), EmissionError>;
}

/// Collects units in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    units: Mutex<BTreeMap<(String, String), GeneratedUnit>>
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of units written.
    pub fn len(&self) -> usize {
        self.units.lock().len()
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.units.lock().is_empty()
    }

    /// Unit by package and name.
    pub fn get(&self, package: &str, name: &str) -> Option<GeneratedUnit> {
        self.units
            .lock()
            .get(&(package.to_string(), name.to_string()))
            .cloned()
    }

    /// All units, ordered by package and name.
    pub fn units(&self) -> Vec<GeneratedUnit> {
        self.units.lock().values().cloned().collect()
    }

    /// Every unit as the body of a single module: header, deduplicated
    /// imports, then code in name order.
    pub fn module_source(&self) -> String {
        let units = self.units();
        let mut imports = Vec::new();
        for unit in &units {
            for import in &unit.imports {
                if !imports.contains(import) {
                    imports.push(import.clone());
                }
            }
        }

        let mut out = String::from(marker::HEADER);
        out.push('\n');
        for import in &imports {
            out.push_str(&marker::import(import));
            out.push('\n');
        }
        for unit in &units {
            out.push('\n');
            out.push_str(&unit.code);
            out.push('\n');
        }
        out
    }
}

impl OutputSink for MemorySink {
    fn write(&self, unit: GeneratedUnit) -> Result<(), EmissionError> {
        let mut units = self.units.lock();
        let key = (unit.package.clone(), unit.name.clone());
        if units.contains_key(&key) {
            return Err(EmissionError::Collision {
                package: unit.package,
                name:    unit.name
            });
        }
        debug!(package = %unit.package, name = %unit.name, "stored view");
        units.insert(key, unit);
        Ok(())
    }
}

/// Writes one file per unit below a root directory.
///
/// The package maps to a directory with the leading `crate` segment
/// dropped: `crate::views::OrderView` lands in `views/order_view.rs`.
/// Existing files are never overwritten, and a failed write leaves no
/// partial file behind.
#[derive(Debug)]
pub struct DirSink {
    root:    PathBuf,
    claimed: Mutex<HashSet<PathBuf>>
}

impl DirSink {
    /// Create a sink writing below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:    root.into(),
            claimed: Mutex::new(HashSet::new())
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination path of `unit`.
    pub fn path_for(&self, unit: &GeneratedUnit) -> PathBuf {
        let mut path = self.root.clone();
        for segment in unit
            .package
            .split("::")
            .filter(|s| !s.is_empty())
            .skip_while(|s| *s == "crate")
        {
            path.push(segment);
        }
        path.push(unit.file_name());
        path
    }

    fn persist(&self, path: &Path, unit: &GeneratedUnit) -> Result<(), EmissionError> {
        let io_error = |source: io::Error| EmissionError::Io {
            path: path.to_path_buf(),
            source
        };
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).map_err(io_error)?;

        // Staged next to the target; dropped (and deleted) on any failure.
        let mut staged = NamedTempFile::new_in(dir).map_err(io_error)?;
        staged
            .write_all(unit.contents().as_bytes())
            .and_then(|()| staged.flush())
            .map_err(io_error)?;
        match staged.persist_noclobber(path) {
            Ok(_) => Ok(()),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                Err(EmissionError::Collision {
                    package: unit.package.clone(),
                    name:    unit.name.clone()
                })
            }
            Err(err) => Err(io_error(err.error))
        }
    }
}

impl OutputSink for DirSink {
    fn write(&self, unit: GeneratedUnit) -> Result<(), EmissionError> {
        let path = self.path_for(&unit);
        if !self.claimed.lock().insert(path.clone()) {
            return Err(EmissionError::Collision {
                package: unit.package,
                name:    unit.name
            });
        }

        match self.persist(&path, &unit) {
            Ok(()) => {
                debug!(path = %path.display(), "wrote view");
                Ok(())
            }
            Err(err) => {
                if matches!(err, EmissionError::Io { .. }) {
                    self.claimed.lock().remove(&path);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(package: &str, name: &str) -> GeneratedUnit {
        GeneratedUnit {
            package: package.to_string(),
            name:    name.to_string(),
            source:  "crate::model::Order".to_string(),
            imports: vec!["crate::model".to_string()],
            code:    format!("pub struct {name} {{}}")
        }
    }

    #[test]
    fn file_names_are_snake_case() {
        assert_eq!(unit("", "OrderSummaryView").file_name(), "order_summary_view.rs");
    }

    #[test]
    fn contents_start_with_header() {
        let text = unit("crate::views", "OrderView").contents();
        assert!(text.starts_with(marker::HEADER));
        assert!(text.contains("use crate::model::*;"));
        assert!(text.contains("pub struct OrderView {}"));
    }

    #[test]
    fn memory_sink_rejects_duplicates() {
        let sink = MemorySink::new();
        sink.write(unit("crate::views", "OrderView")).unwrap();
        sink.write(unit("crate::other", "OrderView")).unwrap();
        let err = sink.write(unit("crate::views", "OrderView")).unwrap_err();
        assert!(matches!(err, EmissionError::Collision { .. }));
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn module_source_deduplicates_imports() {
        let sink = MemorySink::new();
        sink.write(unit("crate::views", "OrderView")).unwrap();
        sink.write(unit("crate::views", "OrderGridView")).unwrap();
        let text = sink.module_source();
        assert_eq!(text.matches("use crate::model::*;").count(), 1);
        let grid = text.find("OrderGridView").unwrap();
        let view = text.find("pub struct OrderView").unwrap();
        assert!(grid < view);
    }

    #[test]
    fn dir_sink_paths() {
        let sink = DirSink::new("/out");
        assert_eq!(
            sink.path_for(&unit("crate::views::orders", "OrderView")),
            PathBuf::from("/out/views/orders/order_view.rs")
        );
        assert_eq!(sink.path_for(&unit("", "OrderView")), PathBuf::from("/out/order_view.rs"));
    }

    #[test]
    fn dir_sink_leaves_only_complete_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirSink::new(dir.path());
        sink.write(unit("crate::views", "OrderView")).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path().join("views"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["order_view.rs"]);
        let text = fs::read_to_string(dir.path().join("views/order_view.rs")).unwrap();
        assert_eq!(text, unit("crate::views", "OrderView").contents());
    }

    #[test]
    fn dir_sink_failed_write_can_be_retried() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("views");
        fs::write(&blocker, "not a directory").unwrap();
        let sink = DirSink::new(dir.path());

        let err = sink.write(unit("crate::views", "OrderView")).unwrap_err();
        assert!(matches!(err, EmissionError::Io { .. }));

        fs::remove_file(&blocker).unwrap();
        sink.write(unit("crate::views", "OrderView")).unwrap();
        assert!(blocker.join("order_view.rs").is_file());
    }

    #[test]
    fn dir_sink_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("views/order_view.rs");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "// hand written").unwrap();

        let err = DirSink::new(dir.path())
            .write(unit("crate::views", "OrderView"))
            .unwrap_err();
        assert!(matches!(err, EmissionError::Collision { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "// hand written");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
