use serde::Serialize;

/// One component of the total force, evaluated through a named socket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceEntry {
    /// Name of a [`ForceFieldSocket`](super::ForceFieldSocket) declared in
    /// the same deck.
    pub forcefield: String,
    /// Ring-polymer contraction: evaluate this component on a smaller
    /// number of beads than the system carries. `None` means all beads.
    pub nbeads: Option<usize>,
    /// MTS weight vector, one coefficient per integration level. Empty
    /// means the component acts on the outermost level only.
    pub weights: Vec<f64>,
}

impl ForceEntry {
    pub fn new(forcefield: impl Into<String>) -> Self {
        Self {
            forcefield: forcefield.into(),
            nbeads: None,
            weights: Vec::new(),
        }
    }
}
