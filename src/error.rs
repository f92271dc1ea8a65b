//! Errors raised at the crate's I/O edges.
//!
//! The per-frame simulation never fails; only loading and saving
//! configuration or waypoint files can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load config file {path:?}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("failed to save config file {path:?}: {source}")]
    ConfigSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for [{section}] {key}: {value}")]
    ConfigValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },

    #[error("waypoint file {path:?}: {source}")]
    WaypointIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("waypoint data: {0}")]
    WaypointJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
