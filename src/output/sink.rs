//! Durable persistence of crawl progress
//!
//! After each processed page the engine flushes the current asset list and a
//! full ledger snapshot, so an interrupted crawl still leaves partial
//! progress on disk.

use crate::state::LedgerSnapshot;
use crate::PersistError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Writes crawl snapshots to the two output files
///
/// - Asset list: one URL per line, newline-terminated, discovery order
/// - Ledger: a JSON object mapping each seen URL to its state string
///
/// Each file is replaced whole on every flush, via a write-to-temp-then-
/// rename so a concurrent reader never observes a torn file. Flushes from
/// distinct engine tasks are serialized by the sink's own lock.
pub struct PersistenceSink {
    assets_path: PathBuf,
    ledger_path: PathBuf,
    write_lock: Mutex<()>,
}

impl PersistenceSink {
    /// Creates a sink writing to the given paths
    pub fn new(assets_path: &str, ledger_path: &str) -> Self {
        Self {
            assets_path: PathBuf::from(assets_path),
            ledger_path: PathBuf::from(ledger_path),
            write_lock: Mutex::new(()),
        }
    }

    /// Durably writes the snapshot, overwriting any prior one
    ///
    /// # Arguments
    ///
    /// * `snapshot` - A consistent ledger snapshot to persist
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Both files written
    /// * `Err(PersistError)` - A write failed; the caller logs and continues
    pub fn flush(&self, snapshot: &LedgerSnapshot) -> Result<(), PersistError> {
        let _guard = self.write_lock.lock().unwrap();

        let mut asset_lines = String::new();
        for asset in &snapshot.assets {
            asset_lines.push_str(asset);
            asset_lines.push('\n');
        }
        write_replace(&self.assets_path, asset_lines.as_bytes())?;

        let ledger_json = serde_json::to_vec_pretty(&snapshot.visited)?;
        write_replace(&self.ledger_path, &ledger_json)?;

        Ok(())
    }
}

/// Replaces the file at `path` atomically with respect to other writers
fn write_replace(path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CrawlState;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn create_sink(dir: &TempDir) -> PersistenceSink {
        PersistenceSink::new(
            dir.path().join("pdf_urls.txt").to_str().unwrap(),
            dir.path().join("visited_urls.json").to_str().unwrap(),
        )
    }

    fn create_snapshot() -> LedgerSnapshot {
        let mut visited = HashMap::new();
        visited.insert(
            "https://example.org/".to_string(),
            CrawlState::CrawledPage,
        );
        visited.insert(
            "https://example.org/report.pdf".to_string(),
            CrawlState::CrawledAsset,
        );
        visited.insert(
            "https://example.org/broken".to_string(),
            CrawlState::Failed,
        );

        LedgerSnapshot {
            visited,
            assets: vec!["https://example.org/report.pdf".to_string()],
        }
    }

    #[test]
    fn test_flush_writes_asset_lines() {
        let dir = TempDir::new().unwrap();
        let sink = create_sink(&dir);

        sink.flush(&create_snapshot()).unwrap();

        let contents = fs::read_to_string(dir.path().join("pdf_urls.txt")).unwrap();
        assert_eq!(contents, "https://example.org/report.pdf\n");
    }

    #[test]
    fn test_flush_preserves_discovery_order() {
        let dir = TempDir::new().unwrap();
        let sink = create_sink(&dir);

        let mut snapshot = create_snapshot();
        snapshot.assets = vec![
            "https://example.org/z.pdf".to_string(),
            "https://example.org/a.pdf".to_string(),
            "https://example.org/m.pdf".to_string(),
        ];
        sink.flush(&snapshot).unwrap();

        let contents = fs::read_to_string(dir.path().join("pdf_urls.txt")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "https://example.org/z.pdf",
                "https://example.org/a.pdf",
                "https://example.org/m.pdf"
            ]
        );
    }

    #[test]
    fn test_flush_writes_ledger_json() {
        let dir = TempDir::new().unwrap();
        let sink = create_sink(&dir);

        sink.flush(&create_snapshot()).unwrap();

        let contents = fs::read_to_string(dir.path().join("visited_urls.json")).unwrap();
        let parsed: HashMap<String, CrawlState> = serde_json::from_str(&contents).unwrap();

        assert_eq!(parsed.len(), 3);
        assert_eq!(
            parsed.get("https://example.org/"),
            Some(&CrawlState::CrawledPage)
        );
        assert_eq!(
            parsed.get("https://example.org/report.pdf"),
            Some(&CrawlState::CrawledAsset)
        );
        assert_eq!(
            parsed.get("https://example.org/broken"),
            Some(&CrawlState::Failed)
        );
    }

    #[test]
    fn test_flush_overwrites_prior_snapshot() {
        let dir = TempDir::new().unwrap();
        let sink = create_sink(&dir);

        let mut snapshot = create_snapshot();
        sink.flush(&snapshot).unwrap();

        snapshot
            .assets
            .push("https://example.org/second.pdf".to_string());
        sink.flush(&snapshot).unwrap();

        let contents = fs::read_to_string(dir.path().join("pdf_urls.txt")).unwrap();
        assert_eq!(
            contents,
            "https://example.org/report.pdf\nhttps://example.org/second.pdf\n"
        );
    }

    #[test]
    fn test_flush_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let sink = create_sink(&dir);

        let snapshot = LedgerSnapshot {
            visited: HashMap::new(),
            assets: Vec::new(),
        };
        sink.flush(&snapshot).unwrap();

        let assets = fs::read_to_string(dir.path().join("pdf_urls.txt")).unwrap();
        assert_eq!(assets, "");

        let ledger = fs::read_to_string(dir.path().join("visited_urls.json")).unwrap();
        let parsed: HashMap<String, CrawlState> = serde_json::from_str(&ledger).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_flush_missing_directory_errors() {
        let sink = PersistenceSink::new(
            "/nonexistent-dir/pdf_urls.txt",
            "/nonexistent-dir/visited_urls.json",
        );

        let result = sink.flush(&create_snapshot());
        assert!(matches!(result, Err(PersistError::Io(_))));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let sink = create_sink(&dir);

        sink.flush(&create_snapshot()).unwrap();

        let entries: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();

        assert!(entries.iter().all(|name| !name.ends_with(".tmp")));
        assert_eq!(entries.len(), 2);
    }
}
