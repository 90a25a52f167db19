//! Wholesale JSON reads and writes.
//!
//! Writes are pretty-printed with two-space indentation and end with a
//! newline so the persisted files diff cleanly.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::dataset::Dataset;
use crate::error::{ModelError, Result};

/// Load and shape a dataset document.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    read_json(path).map_err(|e| match e {
        ModelError::Json { source, .. } if source.classify() == Category::Data => {
            ModelError::structure(source.to_string())
        }
        other => other,
    })
}

/// Persist a dataset document.
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    write_json(path, dataset, "dataset")
}

/// Read any JSON document from disk.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| ModelError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| ModelError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn to_pretty_json<T: Serialize>(value: &T, what: &'static str) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| ModelError::Serialization { what, source: e })?;
    text.push('\n');
    Ok(text)
}

/// Write a JSON document through a temp file and rename.
pub fn write_json<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    let text = to_pretty_json(value, what)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ModelError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|e| ModelError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(text.as_bytes())
        .map_err(|e| ModelError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
    file.sync_all().map_err(|e| ModelError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ModelError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote {what}");
    Ok(())
}
