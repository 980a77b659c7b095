use crate::io::value::{self, ValueError};
use crate::model::{
    Cell, CellShape, CheckpointOutput, EnsembleSpec, FileSource, ForceEntry, ForceFieldSocket,
    InitializeSpec, MotionSpec, OutputSpec, ParseKeywordError, PropertiesOutput, Simulation,
    SystemSpec, Thermostat, TrajectoryFormat, TrajectoryOutput, Verbosity, VelocitySpec,
};
use crate::units::Quantity;
use nalgebra::Matrix3;
use roxmltree::{Document, Node};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Line and column of a node in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] roxmltree::Error),
    #[error("document root must be <simulation>, found <{0}>")]
    WrongRoot(String),
    #[error("missing required element <{element}> in <{parent}> at {pos}")]
    MissingElement {
        element: &'static str,
        parent: String,
        pos: Position,
    },
    #[error("missing required attribute '{attribute}' on <{element}> at {pos}")]
    MissingAttribute {
        attribute: &'static str,
        element: String,
        pos: Position,
    },
    #[error("unexpected element <{element}> at {pos}")]
    UnexpectedElement { element: String, pos: Position },
    #[error("unexpected attribute '{attribute}' on <{element}> at {pos}")]
    UnexpectedAttribute {
        attribute: String,
        element: String,
        pos: Position,
    },
    #[error("duplicate element <{element}> at {pos}")]
    DuplicateElement { element: String, pos: Position },
    #[error("<{element}> at {pos} has no value")]
    EmptyElement { element: String, pos: Position },
    #[error("invalid value in <{element}> at {pos}: {source}")]
    Value {
        element: String,
        pos: Position,
        source: ValueError,
    },
    #[error("invalid attribute '{attribute}' on <{element}> at {pos}: {source}")]
    Attribute {
        attribute: &'static str,
        element: String,
        pos: Position,
        source: ValueError,
    },
    #[error("<cell mode='{mode}'> at {pos} needs {expected} numbers, found {found}")]
    CellArity {
        mode: String,
        expected: usize,
        found: usize,
        pos: Position,
    },
}

/// Parses a complete deck from its XML text.
pub fn read_deck(text: &str) -> Result<Simulation, DeckError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "simulation" {
        return Err(DeckError::WrongRoot(root.tag_name().name().to_string()));
    }
    read_simulation(root)
}

fn pos_of(node: Node) -> Position {
    let pos = node.document().text_pos_at(node.range().start);
    Position {
        line: pos.row,
        col: pos.col,
    }
}

fn tag(node: Node) -> String {
    node.tag_name().name().to_string()
}

/// Rejects any attribute outside the allowed set.
fn check_attrs(node: Node, allowed: &[&str]) -> Result<(), DeckError> {
    for attr in node.attributes() {
        if !allowed.contains(&attr.name()) {
            return Err(DeckError::UnexpectedAttribute {
                attribute: attr.name().to_string(),
                element: tag(node),
                pos: pos_of(node),
            });
        }
    }
    Ok(())
}

fn require_attr<'a>(node: Node<'a, '_>, name: &'static str) -> Result<&'a str, DeckError> {
    node.attribute(name).ok_or_else(|| DeckError::MissingAttribute {
        attribute: name,
        element: tag(node),
        pos: pos_of(node),
    })
}

fn attr_value<T>(node: Node, name: &'static str, raw: &str) -> Result<T, DeckError>
where
    T: FromStr<Err = ParseKeywordError>,
{
    raw.parse().map_err(|e: ParseKeywordError| DeckError::Attribute {
        attribute: name,
        element: tag(node),
        pos: pos_of(node),
        source: ValueError::Keyword(e),
    })
}

fn keyword_attr<T>(node: Node, name: &'static str) -> Result<T, DeckError>
where
    T: FromStr<Err = ParseKeywordError>,
{
    attr_value(node, name, require_attr(node, name)?)
}

fn optional_keyword_attr<T>(node: Node, name: &'static str) -> Result<Option<T>, DeckError>
where
    T: FromStr<Err = ParseKeywordError>,
{
    match node.attribute(name) {
        Some(raw) => attr_value(node, name, raw).map(Some),
        None => Ok(None),
    }
}

fn bool_attr(node: Node, name: &'static str, default: bool) -> Result<bool, DeckError> {
    match node.attribute(name) {
        Some(raw) => value::parse_bool(raw).map_err(|source| DeckError::Attribute {
            attribute: name,
            element: tag(node),
            pos: pos_of(node),
            source,
        }),
        None => Ok(default),
    }
}

fn int_attr<T>(node: Node, name: &'static str) -> Result<Option<T>, DeckError>
where
    T: FromStr,
{
    match node.attribute(name) {
        Some(raw) => value::parse_int(raw)
            .map(Some)
            .map_err(|source| DeckError::Attribute {
                attribute: name,
                element: tag(node),
                pos: pos_of(node),
                source,
            }),
        None => Ok(None),
    }
}

/// Trimmed text content of a leaf element.
fn text_of<'a>(node: Node<'a, '_>) -> Result<&'a str, DeckError> {
    let raw = node.text().map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(DeckError::EmptyElement {
            element: tag(node),
            pos: pos_of(node),
        });
    }
    Ok(raw)
}

fn value_err(node: Node, source: ValueError) -> DeckError {
    DeckError::Value {
        element: tag(node),
        pos: pos_of(node),
        source,
    }
}

fn float_text(node: Node) -> Result<f64, DeckError> {
    value::parse_float(text_of(node)?).map_err(|e| value_err(node, e))
}

fn int_text<T: FromStr>(node: Node) -> Result<T, DeckError> {
    value::parse_int(text_of(node)?).map_err(|e| value_err(node, e))
}

/// A float leaf with an optional `units` attribute.
fn quantity_text(node: Node, extra_attrs: &[&str]) -> Result<Quantity, DeckError> {
    let mut allowed = vec!["units"];
    allowed.extend_from_slice(extra_attrs);
    check_attrs(node, &allowed)?;
    Ok(Quantity {
        value: float_text(node)?,
        unit: node.attribute("units").map(str::to_string),
    })
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn set_once<T>(slot: &mut Option<T>, node: Node, parse: impl FnOnce(Node) -> Result<T, DeckError>) -> Result<(), DeckError> {
    if slot.is_some() {
        return Err(DeckError::DuplicateElement {
            element: tag(node),
            pos: pos_of(node),
        });
    }
    *slot = Some(parse(node)?);
    Ok(())
}

fn unexpected(node: Node) -> DeckError {
    DeckError::UnexpectedElement {
        element: tag(node),
        pos: pos_of(node),
    }
}

fn missing(node: Node, element: &'static str) -> DeckError {
    DeckError::MissingElement {
        element,
        parent: tag(node),
        pos: pos_of(node),
    }
}

fn read_simulation(node: Node) -> Result<Simulation, DeckError> {
    check_attrs(node, &["verbosity"])?;
    let verbosity = optional_keyword_attr(node, "verbosity")?.unwrap_or(Verbosity::Low);

    let mut total_steps = None;
    let mut seed = None;
    let mut forcefields = Vec::new();
    let mut output = None;
    let mut system = None;

    for child in elements(node) {
        match child.tag_name().name() {
            "total_steps" => set_once(&mut total_steps, child, |n| {
                check_attrs(n, &[])?;
                int_text::<usize>(n)
            })?,
            "prng" => set_once(&mut seed, child, read_prng)?,
            "ffsocket" => forcefields.push(read_ffsocket(child)?),
            "output" => set_once(&mut output, child, read_output)?,
            "system" => set_once(&mut system, child, read_system)?,
            _ => return Err(unexpected(child)),
        }
    }

    Ok(Simulation {
        verbosity,
        total_steps: total_steps.ok_or_else(|| missing(node, "total_steps"))?,
        seed,
        forcefields,
        output: output.ok_or_else(|| missing(node, "output"))?,
        system: system.ok_or_else(|| missing(node, "system"))?,
    })
}

fn read_prng(node: Node) -> Result<u64, DeckError> {
    check_attrs(node, &[])?;
    let mut seed = None;
    for child in elements(node) {
        match child.tag_name().name() {
            "seed" => set_once(&mut seed, child, |n| {
                check_attrs(n, &[])?;
                int_text::<u64>(n)
            })?,
            _ => return Err(unexpected(child)),
        }
    }
    seed.ok_or_else(|| missing(node, "seed"))
}

fn read_ffsocket(node: Node) -> Result<ForceFieldSocket, DeckError> {
    check_attrs(node, &["name", "mode", "pbc"])?;
    let name = require_attr(node, "name")?.to_string();
    let mode = keyword_attr(node, "mode")?;
    let pbc = bool_attr(node, "pbc", true)?;

    let mut address = None;
    let mut port = None;
    let mut slots = None;
    let mut latency = None;
    let mut timeout = None;
    let mut active = None;

    for child in elements(node) {
        match child.tag_name().name() {
            "address" => set_once(&mut address, child, |n| {
                check_attrs(n, &[])?;
                Ok(text_of(n)?.to_string())
            })?,
            "port" => set_once(&mut port, child, |n| {
                check_attrs(n, &[])?;
                int_text::<u16>(n)
            })?,
            "slots" => set_once(&mut slots, child, |n| {
                check_attrs(n, &[])?;
                int_text::<usize>(n)
            })?,
            "latency" => set_once(&mut latency, child, |n| {
                check_attrs(n, &[])?;
                float_text(n)
            })?,
            "timeout" => set_once(&mut timeout, child, |n| {
                check_attrs(n, &[])?;
                float_text(n)
            })?,
            "activelist" => set_once(&mut active, child, |n| {
                check_attrs(n, &[])?;
                value::parse_index_vector(text_of(n)?).map_err(|e| value_err(n, e))
            })?,
            _ => return Err(unexpected(child)),
        }
    }

    let mut socket = ForceFieldSocket::new(name, mode, String::new());
    socket.address = address.ok_or_else(|| missing(node, "address"))?;
    socket.pbc = pbc;
    socket.active = active;
    if let Some(port) = port {
        socket.port = port;
    }
    if let Some(slots) = slots {
        socket.slots = slots;
    }
    if let Some(latency) = latency {
        socket.latency = latency;
    }
    if let Some(timeout) = timeout {
        socket.timeout = timeout;
    }
    Ok(socket)
}

fn read_output(node: Node) -> Result<OutputSpec, DeckError> {
    check_attrs(node, &["prefix"])?;
    let mut output = OutputSpec::new(require_attr(node, "prefix")?);

    for child in elements(node) {
        match child.tag_name().name() {
            "trajectory" => output.trajectories.push(read_trajectory(child)?),
            "properties" => {
                let mut properties = output.properties.take();
                set_once(&mut properties, child, read_properties)?;
                output.properties = properties;
            }
            "checkpoint" => {
                let mut checkpoint = output.checkpoint.take();
                set_once(&mut checkpoint, child, read_checkpoint)?;
                output.checkpoint = checkpoint;
            }
            _ => return Err(unexpected(child)),
        }
    }
    Ok(output)
}

fn read_trajectory(node: Node) -> Result<TrajectoryOutput, DeckError> {
    check_attrs(node, &["filename", "stride", "format"])?;
    Ok(TrajectoryOutput {
        filename: require_attr(node, "filename")?.to_string(),
        stride: int_attr(node, "stride")?.ok_or_else(|| DeckError::MissingAttribute {
            attribute: "stride",
            element: tag(node),
            pos: pos_of(node),
        })?,
        format: optional_keyword_attr(node, "format")?.unwrap_or(TrajectoryFormat::Xyz),
        quantity: text_of(node)?.to_string(),
    })
}

fn read_properties(node: Node) -> Result<PropertiesOutput, DeckError> {
    check_attrs(node, &["filename", "stride"])?;
    Ok(PropertiesOutput {
        filename: node.attribute("filename").unwrap_or("out").to_string(),
        stride: int_attr(node, "stride")?.ok_or_else(|| DeckError::MissingAttribute {
            attribute: "stride",
            element: tag(node),
            pos: pos_of(node),
        })?,
        quantities: value::parse_property_list(text_of(node)?).map_err(|e| value_err(node, e))?,
    })
}

fn read_checkpoint(node: Node) -> Result<CheckpointOutput, DeckError> {
    check_attrs(node, &["filename", "stride", "overwrite"])?;
    Ok(CheckpointOutput {
        filename: node.attribute("filename").unwrap_or("checkpoint").to_string(),
        stride: int_attr(node, "stride")?.ok_or_else(|| DeckError::MissingAttribute {
            attribute: "stride",
            element: tag(node),
            pos: pos_of(node),
        })?,
        overwrite: bool_attr(node, "overwrite", true)?,
    })
}

fn read_system(node: Node) -> Result<SystemSpec, DeckError> {
    check_attrs(node, &[])?;
    let mut initialize = None;
    let mut forces = None;
    let mut motion = None;
    let mut ensemble = None;

    for child in elements(node) {
        match child.tag_name().name() {
            "initialize" => set_once(&mut initialize, child, read_initialize)?,
            "forces" => set_once(&mut forces, child, read_forces)?,
            "motion" => set_once(&mut motion, child, read_motion)?,
            "ensemble" => set_once(&mut ensemble, child, read_ensemble)?,
            _ => return Err(unexpected(child)),
        }
    }

    Ok(SystemSpec {
        initialize: initialize.unwrap_or_default(),
        forces: forces.ok_or_else(|| missing(node, "forces"))?,
        motion: motion.ok_or_else(|| missing(node, "motion"))?,
        ensemble: ensemble.ok_or_else(|| missing(node, "ensemble"))?,
    })
}

fn read_initialize(node: Node) -> Result<InitializeSpec, DeckError> {
    check_attrs(node, &["nbeads"])?;
    let mut init = InitializeSpec {
        nbeads: int_attr(node, "nbeads")?.unwrap_or(1),
        ..InitializeSpec::default()
    };

    let mut file = None;
    let mut cell = None;
    let mut velocities = None;
    for child in elements(node) {
        match child.tag_name().name() {
            "file" => set_once(&mut file, child, read_file_source)?,
            "cell" => set_once(&mut cell, child, read_cell)?,
            "velocities" => set_once(&mut velocities, child, read_velocities)?,
            _ => return Err(unexpected(child)),
        }
    }
    init.file = file;
    init.cell = cell;
    init.velocities = velocities;
    Ok(init)
}

fn read_file_source(node: Node) -> Result<FileSource, DeckError> {
    check_attrs(node, &["mode"])?;
    Ok(FileSource {
        format: keyword_attr(node, "mode")?,
        path: text_of(node)?.to_string(),
    })
}

fn read_cell(node: Node) -> Result<Cell, DeckError> {
    check_attrs(node, &["mode", "units"])?;
    let mode = require_attr(node, "mode")?;
    let numbers = value::parse_vector(text_of(node)?).map_err(|e| value_err(node, e))?;

    let arity_err = |expected: usize| DeckError::CellArity {
        mode: mode.to_string(),
        expected,
        found: numbers.len(),
        pos: pos_of(node),
    };

    let shape = match mode {
        "abc" => {
            let [a, b, c]: [f64; 3] = numbers.clone().try_into().map_err(|_| arity_err(3))?;
            CellShape::Lengths([a, b, c])
        }
        "abcABC" => {
            let v: [f64; 6] = numbers.clone().try_into().map_err(|_| arity_err(6))?;
            CellShape::LengthsAngles {
                lengths: [v[0], v[1], v[2]],
                angles_deg: [v[3], v[4], v[5]],
            }
        }
        "h" => {
            let v: [f64; 9] = numbers.clone().try_into().map_err(|_| arity_err(9))?;
            CellShape::Matrix(Matrix3::new(
                v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8],
            ))
        }
        other => {
            return Err(DeckError::Attribute {
                attribute: "mode",
                element: tag(node),
                pos: pos_of(node),
                source: ValueError::Keyword(ParseKeywordError::new(
                    "cell mode",
                    other,
                    "abc, abcABC, h",
                )),
            });
        }
    };

    Ok(Cell {
        shape,
        units: node.attribute("units").map(str::to_string),
    })
}

fn read_velocities(node: Node) -> Result<VelocitySpec, DeckError> {
    let mode = require_attr(node, "mode")?;
    if mode != "thermal" {
        return Err(DeckError::Attribute {
            attribute: "mode",
            element: tag(node),
            pos: pos_of(node),
            source: ValueError::Keyword(ParseKeywordError::new("velocity mode", mode, "thermal")),
        });
    }
    Ok(VelocitySpec::Thermal {
        temperature: quantity_text(node, &["mode"])?,
    })
}

fn read_forces(node: Node) -> Result<Vec<ForceEntry>, DeckError> {
    check_attrs(node, &[])?;
    let mut entries = Vec::new();
    for child in elements(node) {
        match child.tag_name().name() {
            "force" => entries.push(read_force(child)?),
            _ => return Err(unexpected(child)),
        }
    }
    Ok(entries)
}

fn read_force(node: Node) -> Result<ForceEntry, DeckError> {
    check_attrs(node, &["forcefield", "nbeads"])?;
    let mut entry = ForceEntry::new(require_attr(node, "forcefield")?);
    entry.nbeads = int_attr(node, "nbeads")?;

    let mut weights = None;
    for child in elements(node) {
        match child.tag_name().name() {
            "mts_weights" => set_once(&mut weights, child, |n| {
                check_attrs(n, &[])?;
                value::parse_vector(text_of(n)?).map_err(|e| value_err(n, e))
            })?,
            _ => return Err(unexpected(child)),
        }
    }
    entry.weights = weights.unwrap_or_default();
    Ok(entry)
}

fn read_motion(node: Node) -> Result<MotionSpec, DeckError> {
    check_attrs(node, &["mode"])?;
    let mode = keyword_attr(node, "mode")?;

    let mut timestep = None;
    let mut thermostat = None;
    let mut nmts = None;
    for child in elements(node) {
        match child.tag_name().name() {
            "timestep" => set_once(&mut timestep, child, |n| quantity_text(n, &[]))?,
            "thermostat" => set_once(&mut thermostat, child, read_thermostat)?,
            "nmts" => set_once(&mut nmts, child, |n| {
                check_attrs(n, &[])?;
                value::parse_index_vector(text_of(n)?).map_err(|e| value_err(n, e))
            })?,
            _ => return Err(unexpected(child)),
        }
    }

    Ok(MotionSpec {
        mode,
        timestep: timestep.ok_or_else(|| missing(node, "timestep"))?,
        thermostat,
        nmts: nmts.unwrap_or_else(|| vec![1]),
    })
}

fn read_thermostat(node: Node) -> Result<Thermostat, DeckError> {
    check_attrs(node, &["mode"])?;
    let mode = keyword_attr(node, "mode")?;

    let mut tau = None;
    for child in elements(node) {
        match child.tag_name().name() {
            "tau" => set_once(&mut tau, child, |n| quantity_text(n, &[]))?,
            _ => return Err(unexpected(child)),
        }
    }
    Ok(Thermostat {
        mode,
        tau: tau.ok_or_else(|| missing(node, "tau"))?,
    })
}

fn read_ensemble(node: Node) -> Result<EnsembleSpec, DeckError> {
    check_attrs(node, &[])?;
    let mut temperature = None;
    for child in elements(node) {
        match child.tag_name().name() {
            "temperature" => set_once(&mut temperature, child, |n| quantity_text(n, &[]))?,
            _ => return Err(unexpected(child)),
        }
    }
    Ok(EnsembleSpec {
        temperature: temperature.ok_or_else(|| missing(node, "temperature"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DynamicsMode, SocketMode, ThermostatMode, TrajectoryFormat};

    const FULL_DECK: &str = r#"
<simulation verbosity='medium'>
  <output prefix='water_pimd'>
    <properties stride='2' filename='props'>
      [ time, conserved, temperature{kelvin}, potential ]
    </properties>
    <trajectory filename='pos' stride='20' format='pdb'> positions </trajectory>
    <checkpoint stride='1000' overwrite='false'/>
  </output>
  <total_steps> 4000 </total_steps>
  <prng><seed> 31415 </seed></prng>
  <ffsocket name='qtip4pf' mode='unix'>
    <address> h2o-driver </address>
    <latency> 0.01 </latency>
  </ffsocket>
  <ffsocket name='dftb' mode='inet' pbc='false'>
    <address> localhost </address>
    <port> 21142 </port>
    <slots> 2 </slots>
    <timeout> 600 </timeout>
    <activelist> [0, 1, 2] </activelist>
  </ffsocket>
  <system>
    <initialize nbeads='16'>
      <file mode='chk'> water_216.chk </file>
      <cell mode='abc' units='angstrom'> [18.6, 18.6, 18.6] </cell>
      <velocities mode='thermal' units='kelvin'> 298.0 </velocities>
    </initialize>
    <forces>
      <force forcefield='qtip4pf'> <mts_weights> [1, 0] </mts_weights> </force>
      <force forcefield='dftb' nbeads='4'> <mts_weights> [0, 1] </mts_weights> </force>
    </forces>
    <motion mode='nvt'>
      <timestep units='femtosecond'> 0.25 </timestep>
      <thermostat mode='pile_l'> <tau units='femtosecond'> 100 </tau> </thermostat>
      <nmts> [1, 4] </nmts>
    </motion>
    <ensemble>
      <temperature units='kelvin'> 298.0 </temperature>
    </ensemble>
  </system>
</simulation>
"#;

    #[test]
    fn full_deck_parses_into_the_model() {
        let sim = read_deck(FULL_DECK).unwrap();

        assert_eq!(sim.verbosity, Verbosity::Medium);
        assert_eq!(sim.total_steps, 4000);
        assert_eq!(sim.seed, Some(31415));

        assert_eq!(sim.forcefields.len(), 2);
        let unix = &sim.forcefields[0];
        assert_eq!(unix.name, "qtip4pf");
        assert_eq!(unix.mode, SocketMode::Unix);
        assert_eq!(unix.address, "h2o-driver");
        assert_eq!(unix.port, 31415);
        assert_eq!(unix.latency, 0.01);
        assert!(unix.pbc);

        let inet = &sim.forcefields[1];
        assert_eq!(inet.mode, SocketMode::Inet);
        assert_eq!(inet.port, 21142);
        assert_eq!(inet.slots, 2);
        assert_eq!(inet.timeout, 600.0);
        assert!(!inet.pbc);
        assert_eq!(inet.active, Some(vec![0, 1, 2]));

        assert_eq!(sim.output.prefix, "water_pimd");
        let props = sim.output.properties.as_ref().unwrap();
        assert_eq!(props.stride, 2);
        assert_eq!(props.filename, "props");
        assert_eq!(props.quantities.len(), 4);
        assert_eq!(props.quantities[2].unit.as_deref(), Some("kelvin"));
        assert_eq!(sim.output.trajectories.len(), 1);
        assert_eq!(sim.output.trajectories[0].format, TrajectoryFormat::Pdb);
        assert_eq!(sim.output.trajectories[0].quantity, "positions");
        let chk = sim.output.checkpoint.as_ref().unwrap();
        assert_eq!(chk.stride, 1000);
        assert!(!chk.overwrite);
        assert_eq!(chk.filename, "checkpoint");

        let system = &sim.system;
        assert_eq!(system.initialize.nbeads, 16);
        assert_eq!(system.initialize.file.as_ref().unwrap().path, "water_216.chk");
        assert_eq!(
            system.initialize.cell.as_ref().unwrap().units.as_deref(),
            Some("angstrom")
        );
        assert_eq!(system.forces.len(), 2);
        assert_eq!(system.forces[1].nbeads, Some(4));
        assert_eq!(system.forces[1].weights, vec![0.0, 1.0]);
        assert_eq!(system.motion.mode, DynamicsMode::Nvt);
        assert_eq!(
            system.motion.thermostat.as_ref().unwrap().mode,
            ThermostatMode::PileL
        );
        assert_eq!(system.motion.nmts, vec![1, 4]);
    }

    #[test]
    fn root_must_be_simulation() {
        let result = read_deck("<run><total_steps>1</total_steps></run>");
        assert!(matches!(result, Err(DeckError::WrongRoot(tag)) if tag == "run"));
    }

    #[test]
    fn unknown_elements_are_rejected_with_position() {
        let deck = "<simulation>\n  <magic/>\n</simulation>";
        match read_deck(deck) {
            Err(DeckError::UnexpectedElement { element, pos }) => {
                assert_eq!(element, "magic");
                assert_eq!(pos.line, 2);
            }
            other => panic!("expected UnexpectedElement, got {:?}", other),
        }
    }

    #[test]
    fn unknown_attributes_are_rejected() {
        let deck = "<simulation colour='red'></simulation>";
        assert!(matches!(
            read_deck(deck),
            Err(DeckError::UnexpectedAttribute { attribute, .. }) if attribute == "colour"
        ));
    }

    #[test]
    fn duplicate_singletons_are_rejected() {
        let deck = "<simulation>\
            <total_steps>1</total_steps>\
            <total_steps>2</total_steps>\
            </simulation>";
        assert!(matches!(
            read_deck(deck),
            Err(DeckError::DuplicateElement { element, .. }) if element == "total_steps"
        ));
    }

    #[test]
    fn missing_required_elements_are_reported_against_the_parent() {
        let deck = "<simulation><total_steps>1</total_steps></simulation>";
        assert!(matches!(
            read_deck(deck),
            Err(DeckError::MissingElement { element: "output", .. })
        ));
    }

    #[test]
    fn malformed_scalars_carry_the_offending_element() {
        let deck = "<simulation><total_steps>soon</total_steps></simulation>";
        match read_deck(deck) {
            Err(DeckError::Value { element, source, .. }) => {
                assert_eq!(element, "total_steps");
                assert!(matches!(source, ValueError::Integer(_)));
            }
            other => panic!("expected Value error, got {:?}", other),
        }
    }

    #[test]
    fn cell_arity_must_match_the_declared_mode() {
        let deck = "<simulation>\
            <total_steps>1</total_steps>\
            <output prefix='x'/>\
            <system>\
              <initialize><cell mode='abcABC'>[1, 2, 3]</cell></initialize>\
              <forces/>\
              <motion mode='nve'><timestep>10</timestep></motion>\
              <ensemble><temperature>0.001</temperature></ensemble>\
            </system>\
            </simulation>";
        assert!(matches!(
            read_deck(deck),
            Err(DeckError::CellArity { expected: 6, found: 3, .. })
        ));
    }

    #[test]
    fn ffsocket_requires_an_address() {
        let deck = "<simulation>\
            <total_steps>1</total_steps>\
            <ffsocket name='lj' mode='unix'><port>4</port></ffsocket>\
            </simulation>";
        assert!(matches!(
            read_deck(deck),
            Err(DeckError::MissingElement { element: "address", .. })
        ));
    }

    #[test]
    fn bad_keywords_name_the_attribute_and_choices() {
        let deck = "<simulation>\
            <ffsocket name='lj' mode='carrier-pigeon'><address>x</address></ffsocket>\
            </simulation>";
        match read_deck(deck) {
            Err(DeckError::Attribute { attribute, source, .. }) => {
                assert_eq!(attribute, "mode");
                assert!(source.to_string().contains("unix"));
            }
            other => panic!("expected Attribute error, got {:?}", other),
        }
    }
}
