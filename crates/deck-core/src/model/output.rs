use super::ParseKeywordError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// On-disk format of a trajectory emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryFormat {
    Xyz,
    Pdb,
    Binary,
}

impl FromStr for TrajectoryFormat {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xyz" => Ok(TrajectoryFormat::Xyz),
            "pdb" => Ok(TrajectoryFormat::Pdb),
            "binary" => Ok(TrajectoryFormat::Binary),
            other => Err(ParseKeywordError::new(
                "trajectory format",
                other,
                "xyz, pdb, binary",
            )),
        }
    }
}

impl fmt::Display for TrajectoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryFormat::Xyz => write!(f, "xyz"),
            TrajectoryFormat::Pdb => write!(f, "pdb"),
            TrajectoryFormat::Binary => write!(f, "binary"),
        }
    }
}

/// One per-atom quantity written to its own trajectory file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryOutput {
    pub filename: String,
    /// Steps between two frames.
    pub stride: usize,
    pub format: TrajectoryFormat,
    /// Name of the per-atom quantity, resolved against the registry in
    /// [`crate::properties`].
    pub quantity: String,
}

/// A scalar property requested from the properties emitter, optionally
/// with the unit it should be printed in (`temperature{kelvin}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRequest {
    pub name: String,
    pub unit: Option<String>,
}

impl PropertyRequest {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: None,
        }
    }

    pub fn in_unit(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit.into()),
        }
    }
}

impl fmt::Display for PropertyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{}{{{}}}", self.name, unit),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The column file of scalar properties recorded during the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertiesOutput {
    pub filename: String,
    pub stride: usize,
    /// Ordered list of recorded columns.
    pub quantities: Vec<PropertyRequest>,
}

/// Periodic restart-file emitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointOutput {
    pub filename: String,
    pub stride: usize,
    /// Overwrite one file in place instead of numbering snapshots.
    pub overwrite: bool,
}

/// Everything the run writes to disk: a common filename prefix plus the
/// individual emitters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpec {
    pub prefix: String,
    pub trajectories: Vec<TrajectoryOutput>,
    pub properties: Option<PropertiesOutput>,
    pub checkpoint: Option<CheckpointOutput>,
}

impl OutputSpec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            trajectories: Vec::new(),
            properties: None,
            checkpoint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trajectory_format_parses_known_keywords() {
        assert_eq!("xyz".parse::<TrajectoryFormat>().unwrap(), TrajectoryFormat::Xyz);
        assert_eq!("pdb".parse::<TrajectoryFormat>().unwrap(), TrajectoryFormat::Pdb);
        assert_eq!(
            "binary".parse::<TrajectoryFormat>().unwrap(),
            TrajectoryFormat::Binary
        );
    }

    #[test]
    fn trajectory_format_rejects_unknown_keywords() {
        assert!("dcd".parse::<TrajectoryFormat>().is_err());
    }

    #[test]
    fn property_request_displays_braced_unit() {
        assert_eq!(PropertyRequest::bare("time").to_string(), "time");
        assert_eq!(
            PropertyRequest::in_unit("temperature", "kelvin").to_string(),
            "temperature{kelvin}"
        );
    }
}
