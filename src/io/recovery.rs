use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tempfile::NamedTempFile;
use tracing::warn;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- slate recovery log — append-only
     Each entry below is a task blob that could not be written to the
     store file. Safe to delete once its contents are no longer needed. -->

---
";

/// Sidecar recovery log path for a store file (`tasks.json` gets
/// `tasks.json.recovery.log` next to it).
pub fn recovery_log_path(store_path: &Path) -> PathBuf {
    let mut name = store_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".recovery.log");
    store_path.with_file_name(name)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Preserve a payload that failed to reach the store file.
///
/// Failures here degrade to a warning; there is nowhere left to put the
/// data, and the in-memory list remains the source of truth regardless.
pub fn capture_failed_save(store_path: &Path, payload: &str, cause: &io::Error) {
    if let Err(err) = capture_inner(store_path, payload, cause) {
        warn!(%err, "could not write to recovery log");
    }
}

fn capture_inner(store_path: &Path, payload: &str, cause: &io::Error) -> io::Result<()> {
    let path = recovery_log_path(store_path);
    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    let mut entry = format!(
        "## {} — save failed: {}\n\n```json\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        cause,
    );
    entry.push_str(payload);
    if !payload.ends_with('\n') {
        entry.push('\n');
    }
    entry.push_str("```\n\n---\n");
    file.write_all(entry.as_bytes())?;

    Ok(())
}
