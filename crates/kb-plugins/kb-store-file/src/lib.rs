//! # kb-store-file
//! kairanban/crates/kb-plugins/kb-store-file/src/lib.rs
//! Local filesystem implementation of `StateStore`: one file per key
//! under a data directory. This is the durable backend the demo binary
//! uses in place of browser local storage.

use kb_core::{AppError, Result, StateStore};
use std::io;
use std::path::{Path, PathBuf};

pub struct FileStore {
    /// Root directory for all records (e.g., "./data")
    root_path: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root.into();
        std::fs::create_dir_all(&root_path).map_err(io_err)?;
        tracing::debug!(root = %root_path.display(), "file store opened");
        Ok(Self { root_path })
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root_path.join(format!("{key}.json"))
    }
}

fn io_err(err: io::Error) -> AppError {
    AppError::Storage(err.to_string())
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_err(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.path_for(key), value).map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_err(err)),
        }
    }
}
