use thiserror::Error;

/// Errors raised while loading configuration or the installer dataset.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read installers file {path}: {source}")]
    InstallersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse installers file: {0}")]
    InstallersFileParse(#[source] serde_yaml::Error),

    #[error("installers validation failed: {0}")]
    Validation(String),
}

/// Recoverable failures of a user interaction (copy, open map).
///
/// These are reported to the user and logged; they never abort the session.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("failed to open {url}: {reason}")]
    Open { url: String, reason: String },

    #[error("no installer with SIRET {0}")]
    UnknownRecord(String),
}
