use super::ParseKeywordError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Transport used to reach a force-provider process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketMode {
    /// A local Unix domain socket, addressed by name.
    Unix,
    /// A TCP socket, addressed by host and port.
    Inet,
}

impl FromStr for SocketMode {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unix" => Ok(SocketMode::Unix),
            "inet" => Ok(SocketMode::Inet),
            other => Err(ParseKeywordError::new("socket mode", other, "unix, inet")),
        }
    }
}

impl fmt::Display for SocketMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketMode::Unix => write!(f, "unix"),
            SocketMode::Inet => write!(f, "inet"),
        }
    }
}

/// A configured endpoint through which the engine requests potential-energy
/// and force evaluations from a separate force-provider process.
///
/// Several sockets may coexist in one deck; force-list entries refer to
/// them by `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceFieldSocket {
    /// Handle the force list uses to refer to this endpoint.
    pub name: String,
    pub mode: SocketMode,
    /// Hostname for `inet` sockets, socket name for `unix` sockets.
    pub address: String,
    /// TCP port; ignored by `unix` sockets.
    pub port: u16,
    /// Number of client connections the endpoint accepts at once.
    pub slots: usize,
    /// Polling interval while waiting for results, in seconds.
    pub latency: f64,
    /// Seconds to wait for a force evaluation before the connection is
    /// declared dead. Zero disables the timeout.
    pub timeout: f64,
    /// Whether positions are folded into the periodic cell before dispatch.
    pub pbc: bool,
    /// Indices of the atoms this force field acts on; `None` means all.
    pub active: Option<Vec<usize>>,
}

impl ForceFieldSocket {
    /// A socket with the dialect's default port, slot count, latency,
    /// timeout and periodic-boundary handling.
    pub fn new(name: impl Into<String>, mode: SocketMode, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode,
            address: address.into(),
            port: 31415,
            slots: 4,
            latency: 1e-3,
            timeout: 0.0,
            pbc: true,
            active: None,
        }
    }
}
