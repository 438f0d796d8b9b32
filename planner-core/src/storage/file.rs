//! Directory-backed storage: one `<key>.json` file per key.

use std::path::{Path, PathBuf};

use crate::error::{PlannerError, PlannerResult};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PlannerResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');

        if !valid {
            return Err(PlannerError::Storage(format!("Invalid storage key '{}'", key)));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path_for(key)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PlannerError::Storage(format!(
                "Could not read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()> {
        let path = self.path_for(key)?;
        let temp = path.with_extension("json.tmp");

        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&temp, value))
            .and_then(|_| std::fs::rename(&temp, &path))
            .map_err(|e| PlannerError::Storage(format!("Could not write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("plannerEvents").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("planner");
        let mut store = FileStore::new(&nested);

        store.set("plannerTimeSlots", "[\"06:00 - 07:30\"]").unwrap();

        assert!(nested.join("plannerTimeSlots.json").exists());
        let reopened = FileStore::new(&nested);
        assert_eq!(
            reopened.get("plannerTimeSlots").unwrap().as_deref(),
            Some("[\"06:00 - 07:30\"]")
        );
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(matches!(
            store.set("../outside", "x"),
            Err(PlannerError::Storage(_))
        ));
        assert!(store.get("").is_err());
    }
}
