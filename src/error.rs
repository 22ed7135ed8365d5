use thiserror::Error;

/// Result type for hub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Errors that can occur when interacting with a Videohub
#[derive(Error, Debug)]
pub enum HubError {
    /// TCP connection to the hub could not be established
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        /// Address the connection was attempted against
        addr: String,
        /// Underlying socket error
        source: std::io::Error,
    },

    /// I/O error on an established connection or a preset file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Preset serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Compare or apply was invoked without a loaded preset
    #[error("no preset loaded")]
    NoPresetLoaded,

    /// Compare or save was invoked before the hub was read
    #[error("hub not read yet")]
    HubNotRead,

    /// Named preset does not exist in the store
    #[error("preset not found: {0}")]
    PresetNotFound(String),
}
