//! Installer records and the immutable store they are loaded into.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One installer's contact and location data, keyed by `siret`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installer {
    pub nom: String,
    pub localisation: String,
    /// Multi-line postal address; the first line feeds map queries.
    pub adresse: String,
    pub phone: String,
    pub email: String,
    pub siret: String,
}

#[derive(Debug, Deserialize)]
struct InstallersFile {
    installers: Vec<Installer>,
}

/// Ordered, read-only sequence of installers.
///
/// Built once at startup; `siret` is unique across the store.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Installer>,
}

impl RecordStore {
    /// Build a store from already-parsed records, validating them first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on an empty name, locality or SIRET,
    /// or on a duplicate SIRET.
    pub fn from_records(records: Vec<Installer>) -> Result<Self, ConfigError> {
        validate_installers(&records)?;
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[Installer] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, siret: &str) -> Option<&Installer> {
        self.records.iter().find(|r| r.siret == siret)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load and validate the installer dataset from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_installers(path: &Path) -> Result<RecordStore, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InstallersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: InstallersFile =
        serde_yaml::from_str(&content).map_err(ConfigError::InstallersFileParse)?;

    let store = RecordStore::from_records(file.installers)?;
    tracing::debug!(path = %path.display(), count = store.len(), "loaded installers");
    Ok(store)
}

fn validate_installers(records: &[Installer]) -> Result<(), ConfigError> {
    let mut seen_sirets = HashSet::new();

    for installer in records {
        if installer.nom.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "installer {} has an empty name; nom must be non-empty",
                installer.siret
            )));
        }

        if installer.localisation.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "installer '{}' has an empty localisation",
                installer.nom
            )));
        }

        if installer.siret.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "installer '{}' has an empty SIRET",
                installer.nom
            )));
        }

        if !seen_sirets.insert(installer.siret.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate SIRET: '{}' (from installer '{}')",
                installer.siret, installer.nom
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "installers_test.rs"]
mod tests;
