//! # Snapshot Dump / Restore
//!
//! Parks the whole catalog in a JSON file in the temp folder and brings it
//! back later.
//!
//! ## Flow
//! ```text
//! dump(repo, temp/)                       restore(repo, temp/)
//!   │                                        │
//!   ├─ take_all() under one write lock       ├─ first *.tmp in temp/
//!   ├─ write temp/<uuid>.tmp (JSON)          ├─ parse JSON
//!   └─ on failure: put_back()                ├─ delete the file
//!                                            └─ replace_all()
//! ```
//!
//! A failure at any step leaves the repository as it was. A review that
//! returned `Ok` before the dump is in the snapshot; one that comes after
//! finds an empty repository and fails.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shopfront_core::{Product, Review};

use crate::error::{StoreError, StoreResult};
use crate::repository::{Entry, ProductRepository};

/// File extension of snapshot files.
pub const SNAPSHOT_EXTENSION: &str = "tmp";

#[derive(Debug, Serialize)]
struct SnapshotEntry<'a> {
    product: &'a Product,
    reviews: &'a [Review],
}

#[derive(Debug, Deserialize)]
struct OwnedSnapshotEntry {
    product: Product,
    reviews: Vec<Review>,
}

/// Moves the catalog into a new snapshot file, leaving the repository empty.
pub fn dump(repo: &ProductRepository, temp_dir: &Path) -> StoreResult<PathBuf> {
    let taken = repo.take_all();

    match write_snapshot(&taken, temp_dir) {
        Ok(path) => {
            info!(count = taken.len(), ?path, "Catalog dumped");
            Ok(path)
        }
        Err(e) => {
            warn!(error = %e, "Dump failed, putting the catalog back");
            repo.put_back(taken);
            Err(e)
        }
    }
}

fn write_snapshot(entries: &[Entry], temp_dir: &Path) -> StoreResult<PathBuf> {
    let snapshot: Vec<SnapshotEntry<'_>> = entries
        .iter()
        .map(|(product, reviews)| SnapshotEntry { product, reviews })
        .collect();
    let json = serde_json::to_vec(&snapshot)?;

    fs::create_dir_all(temp_dir).map_err(|e| StoreError::io(temp_dir, e))?;
    let path = temp_dir.join(format!("{}.{}", Uuid::new_v4(), SNAPSHOT_EXTENSION));
    fs::write(&path, json).map_err(|e| StoreError::io(&path, e))?;
    Ok(path)
}

/// Loads the first snapshot in `temp_dir` into the repository and deletes it.
///
/// The repository is only touched once the file has been read, parsed and
/// removed.
pub fn restore(repo: &ProductRepository, temp_dir: &Path) -> StoreResult<usize> {
    let path = first_snapshot(temp_dir)?;
    debug!(?path, "Restoring snapshot");

    let bytes = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
    let entries: Vec<OwnedSnapshotEntry> = serde_json::from_slice(&bytes)?;
    fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;

    let count = entries.len();
    repo.replace_all(entries.into_iter().map(|e| (e.product, e.reviews)));

    info!(count = count, ?path, "Catalog restored");
    Ok(count)
}

fn first_snapshot(temp_dir: &Path) -> StoreResult<PathBuf> {
    let listing = match fs::read_dir(temp_dir) {
        Ok(listing) => listing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::NoSnapshot(temp_dir.to_path_buf()))
        }
        Err(e) => return Err(StoreError::io(temp_dir, e)),
    };

    let mut snapshots: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == SNAPSHOT_EXTENSION)
        })
        .collect();
    snapshots.sort();

    snapshots
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::NoSnapshot(temp_dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};
    use shopfront_core::{Money, Rating};

    fn sample_repo() -> ProductRepository {
        let repo = ProductRepository::new();
        repo.create_food(
            101,
            "Cake",
            Money::from_cents(399),
            Rating::NotRated,
            NaiveDate::from_ymd_opt(2025, 10, 25).unwrap(),
        )
        .unwrap();
        repo.create_drink(102, "Tea", Money::from_cents(199), Rating::NotRated)
            .unwrap();
        repo.review_product(101, Rating::FourStar, "moist").unwrap();
        repo
    }

    #[test]
    fn test_dump_clears_and_restore_brings_back() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join("temp");
        let repo = sample_repo();
        let before = repo.entries();

        let path = dump(&repo, &temp).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "tmp");
        assert!(repo.is_empty());

        assert_eq!(restore(&repo, &temp).unwrap(), 2);
        assert!(!path.exists());

        let after = repo.entries();
        assert_eq!(before.len(), after.len());
        for ((p1, r1), (p2, r2)) in before.iter().zip(after.iter()) {
            assert!(p1.same_values(p2));
            assert_eq!(r1, r2);
        }
    }

    #[test]
    fn test_restore_without_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sample_repo();

        let err = restore(&repo, &dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, StoreError::NoSnapshot(_)));

        fs::write(dir.path().join("notes.txt"), "not a snapshot").unwrap();
        let err = restore(&repo, dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::NoSnapshot(_)));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_corrupt_snapshot_leaves_repository_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tmp");
        fs::write(&path, "{not json").unwrap();

        let repo = sample_repo();
        let err = restore(&repo, dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Snapshot(_)));
        assert_eq!(repo.len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn test_failed_dump_puts_catalog_back() {
        let dir = tempfile::tempdir().unwrap();
        // a file where the temp folder should be
        let blocked = dir.path().join("temp");
        fs::write(&blocked, "not a folder").unwrap();

        let repo = sample_repo();
        assert!(dump(&repo, &blocked).is_err());
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.reviews(101).unwrap().len(), 1);
    }

    #[test]
    fn test_reviews_accepted_during_dumps_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join("temp");
        let repo = ProductRepository::new();
        repo.create_drink(1, "Tea", Money::from_cents(199), Rating::NotRated)
            .unwrap();

        let done = AtomicBool::new(false);
        let accepted = std::thread::scope(|s| {
            let reviewer = s.spawn(|| {
                let mut accepted = 0;
                while !done.load(Ordering::Acquire) {
                    if repo.review_product(1, Rating::FiveStar, "again").is_ok() {
                        accepted += 1;
                    }
                }
                accepted
            });

            for _ in 0..50 {
                dump(&repo, &temp).unwrap();
                restore(&repo, &temp).unwrap();
            }
            done.store(true, Ordering::Release);
            reviewer.join().unwrap()
        });

        assert_eq!(repo.reviews(1).unwrap().len(), accepted);
    }
}
