use super::{Cell, ParseKeywordError};
use crate::units::Quantity;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Format of the file a starting configuration is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// A checkpoint written by a previous run.
    Chk,
    Xyz,
    Pdb,
}

impl FromStr for FileFormat {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chk" => Ok(FileFormat::Chk),
            "xyz" => Ok(FileFormat::Xyz),
            "pdb" => Ok(FileFormat::Pdb),
            other => Err(ParseKeywordError::new("file format", other, "chk, xyz, pdb")),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Chk => write!(f, "chk"),
            FileFormat::Xyz => write!(f, "xyz"),
            FileFormat::Pdb => write!(f, "pdb"),
        }
    }
}

/// Reference to the file holding the starting structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSource {
    pub format: FileFormat,
    pub path: String,
}

/// Initial velocity distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocitySpec {
    /// Resample from a Maxwell-Boltzmann distribution at the given
    /// temperature.
    Thermal { temperature: Quantity },
}

/// Starting conditions of the ring polymer: bead count, structure file,
/// cell geometry and velocity distribution.
///
/// Fields left `None` fall back to whatever the referenced structure file
/// carries; a checkpoint provides all of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitializeSpec {
    /// Number of ring-polymer replicas per atom.
    pub nbeads: usize,
    pub file: Option<FileSource>,
    pub cell: Option<Cell>,
    pub velocities: Option<VelocitySpec>,
}

impl Default for InitializeSpec {
    fn default() -> Self {
        Self {
            nbeads: 1,
            file: None,
            cell: None,
            velocities: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_format_parses_known_keywords() {
        assert_eq!("chk".parse::<FileFormat>().unwrap(), FileFormat::Chk);
        assert_eq!("xyz".parse::<FileFormat>().unwrap(), FileFormat::Xyz);
        assert_eq!("pdb".parse::<FileFormat>().unwrap(), FileFormat::Pdb);
        assert!("gro".parse::<FileFormat>().is_err());
    }

    #[test]
    fn default_initialize_is_a_single_classical_bead() {
        let init = InitializeSpec::default();
        assert_eq!(init.nbeads, 1);
        assert!(init.file.is_none());
        assert!(init.cell.is_none());
        assert!(init.velocities.is_none());
    }
}
