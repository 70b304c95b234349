// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted credential storage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::credential::WifiCredential;
use crate::error::StoreError;

/// Where the last working credential survives a restart.
pub trait CredentialStore {
    /// Returns the stored credential, if any.
    ///
    /// A stored record with an empty SSID counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails. The provisioner treats
    /// this the same as an empty store.
    fn read_persisted(&self) -> Result<Option<WifiCredential>, StoreError>;

    /// Stores `credential`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn save(&mut self, credential: &WifiCredential) -> Result<(), StoreError> {
        let _ = credential;
        Ok(())
    }

    /// Removes the stored credential.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn erase(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A credential kept as a JSON file.
///
/// # Examples
///
/// ```no_run
/// use qrprov_lib::credential::WifiCredential;
/// use qrprov_lib::peripheral::{CredentialStore, JsonFileStore};
///
/// # fn example() -> Result<(), qrprov_lib::error::StoreError> {
/// let mut store = JsonFileStore::new("/var/lib/qrprov/wifi.json");
/// store.save(&WifiCredential::new("Home", "WPA", "secret"))?;
/// assert!(store.read_persisted()?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for JsonFileStore {
    fn read_persisted(&self) -> Result<Option<WifiCredential>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let credential: WifiCredential = serde_json::from_str(&contents)?;
        Ok(credential.has_ssid().then_some(credential))
    }

    fn save(&mut self, credential: &WifiCredential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(credential)?)?;
        tracing::debug!(path = %self.path.display(), "Saved credential");
        Ok(())
    }

    fn erase(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// A credential kept in memory, for simulations and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    credential: Option<WifiCredential>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `credential`.
    #[must_use]
    pub fn with_credential(credential: WifiCredential) -> Self {
        Self {
            credential: Some(credential),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn read_persisted(&self) -> Result<Option<WifiCredential>, StoreError> {
        Ok(self.credential.clone().filter(WifiCredential::has_ssid))
    }

    fn save(&mut self, credential: &WifiCredential) -> Result<(), StoreError> {
        self.credential = Some(credential.clone());
        Ok(())
    }

    fn erase(&mut self) -> Result<(), StoreError> {
        self.credential = None;
        Ok(())
    }
}
