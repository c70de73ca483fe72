//! This module keeps track of the signed-in user, in a durable storage

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::traits::Storage;
use crate::BoxError;


/// The identity of the signed-in user, as returned by `POST /auth/login`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(deserialize_with = "crate::utils::string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}


/// Reads and writes the [`Session`] in a [`Storage`], under a single key.
///
/// There is at most one signed-in user at a time. No stored session means "not authenticated".
#[derive(Debug)]
pub struct SessionStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> SessionStore<S> {
    /// A store that uses the default key (see [`crate::config::SESSION_KEY`])
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, crate::config::SESSION_KEY)
    }

    pub fn with_key<K: ToString>(storage: S, key: K) -> Self {
        Self { storage, key: key.to_string() }
    }

    /// Returns the stored session.
    ///
    /// Unreadable or corrupted content is treated as "nobody is signed in".
    pub fn load(&self) -> Option<Session> {
        let raw = match self.storage.get_item(&self.key) {
            Err(err) => {
                log::warn!("Unable to read the stored session: {}", err);
                return None;
            },
            Ok(None) => return None,
            Ok(Some(raw)) => raw,
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!("Ignoring an invalid stored session: {}", err);
                None
            }
        }
    }

    pub fn save(&mut self, session: &Session) -> Result<(), BoxError> {
        let raw = serde_json::to_string(session)?;
        self.storage.set_item(&self.key, &raw)
    }

    pub fn clear(&mut self) -> Result<(), BoxError> {
        self.storage.remove_item(&self.key)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}


/// A [`Storage`] that keeps every value in a file in a folder
#[derive(Clone, Debug, PartialEq)]
pub struct FileStorage {
    folder: PathBuf,
}

impl FileStorage {
    /// The folder is created when the first value is stored
    pub fn new(folder: &Path) -> Self {
        Self { folder: PathBuf::from(folder) }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name = format!("{}.json", sanitize_filename::sanitize(key));
        self.folder.join(file_name)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, BoxError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to open file {:?}: {}", path, err).into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        if let Err(err) = std::fs::create_dir_all(&self.folder) {
            return Err(format!("Unable to create folder {:?}: {}", self.folder, err).into());
        }
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BoxError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(format!("Unable to remove file {:?}: {}", path, err).into()),
        }
    }
}


/// A [`Storage`] that forgets everything when dropped
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, BoxError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BoxError> {
        self.items.remove(key);
        Ok(())
    }
}
