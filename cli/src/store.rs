use std::fs;
use std::path::{Path, PathBuf};

use tripwire_core::{KeyValueStore, ScoreError};

/// Key-value text store keeping one `<key>.txt` file per key in a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.txt"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) => {
                log::debug!("Nothing read from {}: {}", path.display(), err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ScoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, value))
            .map_err(|err| ScoreError::Storage(format!("{}: {}", path.display(), err)))
    }
}
