//! Error types for tresoweb-store

use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid snapshot {path}: {message}")]
    InvalidSnapshot {
        path: String,
        message: String,
    },

    #[error("IO error")]
    IoError(#[from] io::Error),
}
