// error.rs — Error types for the policy subsystem.
//
// Evaluation itself never fails; these errors only arise while loading
// configuration from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing the policy engine.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The configuration file could not be read.
    #[error("failed to read policy config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was read but could not be parsed.
    #[error("invalid policy config '{}': {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },
}
