use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::io::recovery;
use crate::model::Task;

/// Error type for store blob writes. Reads are fail-soft and never surface
/// an error to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read the task blob at `path`.
///
/// The blob is untrusted input and must never take startup down: an absent,
/// unreadable, or malformed blob yields an empty list, and each record is
/// normalized field by field.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    if !path.exists() {
        return Vec::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read task store, starting empty");
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            warn!(path = %path.display(), "task store is not an array, starting empty");
            return Vec::new();
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "task store is not valid JSON, starting empty");
            return Vec::new();
        }
    };

    let now = chrono::Utc::now().timestamp_millis();
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record, index, now))
        .collect()
}

/// Serialize `tasks` to the blob at `path` through an atomic write.
///
/// Callers treat this as best-effort: on failure the in-memory list stays
/// the source of truth and the payload is captured in the recovery log.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StorageError> {
    let content = serde_json::to_string_pretty(tasks)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && let Err(source) = fs::create_dir_all(parent)
    {
        recovery::capture_failed_save(path, &content, &source);
        return Err(StorageError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = recovery::atomic_write(path, content.as_bytes()) {
        recovery::capture_failed_save(path, &content, &source);
        return Err(StorageError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Rebuild a task from one untrusted stored record, substituting defaults
/// for anything missing or mistyped.
fn normalize_record(record: Value, index: usize, now: i64) -> Task {
    let id = match string_field(&record, "id") {
        Some(id) if !id.is_empty() => id,
        _ => format!("r-{index}-{now}"),
    };

    Task {
        id,
        title: string_field(&record, "title")
            .unwrap_or_default()
            .trim()
            .to_string(),
        date: string_field(&record, "date").unwrap_or_default(),
        done: truthy(record.get("done")),
        created_at: number_field(&record, "createdAt")
            .filter(|&n| n > 0)
            .unwrap_or(now),
        order: number_field(&record, "order").unwrap_or(index as i64),
    }
}

/// String coercion: strings pass through, scalars stringify.
fn string_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Number coercion: finite numbers and numeric strings count.
fn number_field(record: &Value, key: &str) -> Option<i64> {
    let as_f64 = match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    as_f64.filter(|f| f.is_finite()).map(|f| f as i64)
}

/// Truthiness in the stored blob's original sense: absent, null, false,
/// zero and the empty string are false, everything else is true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
