use crate::{data::ResponseRecord, error::Error};
use sha2::{Digest, Sha256};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Maps road-map files and targets to deterministic souvenir locations and
/// reads/writes the JSON response records stored there.
///
/// Souvenir identifiers are a pure function of the input string; two
/// distinct targets hashing to the same identifier would silently share a
/// file. Not guarded against.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        ArtifactStore { root: root.into() }
    }

    fn souvenir_id(value: &str) -> String {
        hex::encode(Sha256::digest(value.as_bytes()))
    }

    /// The souvenir directory for a road-map file, derived from its
    /// canonical absolute path so that every invocation against the same
    /// file resolves the same artifact set.
    pub fn souvenir_dir<P: AsRef<Path>>(&self, road_map_path: P) -> Result<PathBuf, Error> {
        let canonical = fs::canonicalize(road_map_path.as_ref())?;
        Ok(self
            .root
            .join(Self::souvenir_id(&canonical.to_string_lossy())))
    }

    /// The souvenir file for one target within a souvenir directory.
    pub fn souvenir_path(souvenir_dir: &Path, target: &str) -> PathBuf {
        souvenir_dir.join(format!("{}.json", Self::souvenir_id(target)))
    }

    /// Creates the directory, clearing any previous contents. Destructive;
    /// callers must not invoke this while a test selection is active.
    pub fn ensure_empty(souvenir_dir: &Path) -> Result<(), Error> {
        if souvenir_dir.exists() {
            fs::remove_dir_all(souvenir_dir)?;
        }
        fs::create_dir_all(souvenir_dir)?;
        Ok(())
    }

    /// Creates the directory if absent, leaving existing souvenirs alone.
    pub fn ensure_exists(souvenir_dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(souvenir_dir)?;
        Ok(())
    }

    pub fn write(path: &Path, record: &ResponseRecord) -> Result<(), Error> {
        let contents = serde_json::to_string(record)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<ResponseRecord, Error> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::ArtifactMissing(path.to_path_buf())
            } else {
                Error::IoError(e)
            }
        })?;

        serde_json::from_str(&contents).map_err(|_| Error::ArtifactCorrupt(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn record() -> ResponseRecord {
        ResponseRecord {
            status_code: 200,
            body: String::from("{\"a\":1}"),
        }
    }

    #[test]
    fn souvenir_dir_is_stable_across_calls() {
        let dir = TempDir::new().unwrap();
        let road_map = dir.path().join("trip.json");
        fs::write(&road_map, "{}").unwrap();

        let store = ArtifactStore::new(dir.path().join("souvenirs"));
        let first = store.souvenir_dir(&road_map).unwrap();
        let second = store.souvenir_dir(&road_map).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_targets_get_distinct_paths() {
        let dir = PathBuf::from("/tmp/souvenirs/abc");
        let a = ArtifactStore::souvenir_path(&dir, "/users");
        let b = ArtifactStore::souvenir_path(&dir, "/orders");
        assert_ne!(a, b);
        assert_eq!(a, ArtifactStore::souvenir_path(&dir, "/users"));
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("target.json");

        ArtifactStore::write(&path, &record()).unwrap();
        assert_eq!(ArtifactStore::read(&path).unwrap(), record());
    }

    #[test]
    fn souvenir_file_uses_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("target.json");

        ArtifactStore::write(&path, &record()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"statusCode\":200,\"body\":\"{\\\"a\\\":1}\"}");
    }

    #[test]
    fn missing_and_corrupt_souvenirs_are_distinguished() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ArtifactStore::read(&missing),
            Err(Error::ArtifactMissing(_))
        ));

        let corrupt = dir.path().join("corrupt.json");
        let mut file = fs::File::create(&corrupt).unwrap();
        file.write_all(b"not a souvenir").unwrap();
        assert!(matches!(
            ArtifactStore::read(&corrupt),
            Err(Error::ArtifactCorrupt(_))
        ));
    }

    #[test]
    fn ensure_empty_clears_previous_souvenirs() {
        let dir = TempDir::new().unwrap();
        let souvenir_dir = dir.path().join("abc");
        fs::create_dir_all(&souvenir_dir).unwrap();
        let stale = souvenir_dir.join("stale.json");
        ArtifactStore::write(&stale, &record()).unwrap();

        ArtifactStore::ensure_empty(&souvenir_dir).unwrap();
        assert!(souvenir_dir.exists());
        assert!(!stale.exists());
    }

    #[test]
    fn ensure_exists_keeps_previous_souvenirs() {
        let dir = TempDir::new().unwrap();
        let souvenir_dir = dir.path().join("abc");
        fs::create_dir_all(&souvenir_dir).unwrap();
        let kept = souvenir_dir.join("kept.json");
        ArtifactStore::write(&kept, &record()).unwrap();

        ArtifactStore::ensure_exists(&souvenir_dir).unwrap();
        assert!(kept.exists());
    }
}
