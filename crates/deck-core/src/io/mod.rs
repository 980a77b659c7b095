//! Reading and writing of deck files.
//!
//! [`reader`] turns the XML text into the typed model, rejecting anything
//! the dialect does not define; [`writer`] emits the normalized form back.
//! The path-based helpers here attach the file path to I/O failures.

pub mod reader;
pub mod value;
pub mod writer;

pub use reader::{DeckError, Position, read_deck};
pub use value::ValueError;
pub use writer::write_deck;

use crate::model::Simulation;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckFileError {
    #[error("file I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}': {source}")]
    Parse { path: String, source: DeckError },
}

/// Reads and parses a deck file.
pub fn read_deck_from_path(path: &Path) -> Result<Simulation, DeckFileError> {
    let text = std::fs::read_to_string(path).map_err(|e| DeckFileError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_deck(&text).map_err(|e| DeckFileError::Parse {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Writes the normalized form of a deck to a file.
pub fn write_deck_to_path(sim: &Simulation, path: &Path) -> Result<(), DeckFileError> {
    let io_err = |e| DeckFileError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    let file = File::create(path).map_err(io_err)?;
    write_deck(sim, &mut BufWriter::new(file)).map_err(io_err)
}
