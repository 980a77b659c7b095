//! Emits a deck back to XML in normalized form: defaults spelled out,
//! two-space indentation, one leaf per line. The reader accepts every
//! document this writer produces.

use crate::model::{
    Cell, CellShape, ForceEntry, ForceFieldSocket, MotionSpec, OutputSpec, PropertyRequest,
    Simulation, VelocitySpec,
};
use crate::units::Quantity;
use std::borrow::Cow;
use std::io::{self, Write};

/// Writes the normalized XML form of a deck.
pub fn write_deck(sim: &Simulation, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "<simulation verbosity='{}'>", sim.verbosity)?;
    writeln!(writer, "  <total_steps> {} </total_steps>", sim.total_steps)?;
    if let Some(seed) = sim.seed {
        writeln!(writer, "  <prng>")?;
        writeln!(writer, "    <seed> {} </seed>", seed)?;
        writeln!(writer, "  </prng>")?;
    }
    for socket in &sim.forcefields {
        write_ffsocket(socket, writer)?;
    }
    write_output(&sim.output, writer)?;

    writeln!(writer, "  <system>")?;
    write_initialize(sim, writer)?;
    writeln!(writer, "    <forces>")?;
    for entry in &sim.system.forces {
        write_force(entry, writer)?;
    }
    writeln!(writer, "    </forces>")?;
    write_motion(&sim.system.motion, writer)?;
    writeln!(writer, "    <ensemble>")?;
    write_quantity("temperature", &sim.system.ensemble.temperature, 6, writer)?;
    writeln!(writer, "    </ensemble>")?;
    writeln!(writer, "  </system>")?;
    writeln!(writer, "</simulation>")
}

/// Escapes the characters XML cannot carry verbatim in text or
/// single-quoted attributes.
fn esc(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

fn fmt_vector<T: std::fmt::Display>(values: &[T]) -> String {
    let entries: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", entries.join(", "))
}

fn fmt_property_list(requests: &[PropertyRequest]) -> String {
    let entries: Vec<String> = requests.iter().map(|r| r.to_string()).collect();
    format!("[ {} ]", entries.join(", "))
}

fn units_attr(quantity: &Quantity) -> String {
    match &quantity.unit {
        Some(unit) => format!(" units='{}'", esc(unit)),
        None => String::new(),
    }
}

fn write_quantity(
    name: &str,
    quantity: &Quantity,
    indent: usize,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(
        writer,
        "{:indent$}<{name}{}> {} </{name}>",
        "",
        units_attr(quantity),
        quantity.value,
    )
}

fn write_ffsocket(socket: &ForceFieldSocket, writer: &mut impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "  <ffsocket name='{}' mode='{}' pbc='{}'>",
        esc(&socket.name),
        socket.mode,
        socket.pbc
    )?;
    writeln!(writer, "    <address> {} </address>", esc(&socket.address))?;
    writeln!(writer, "    <port> {} </port>", socket.port)?;
    writeln!(writer, "    <slots> {} </slots>", socket.slots)?;
    writeln!(writer, "    <latency> {} </latency>", socket.latency)?;
    writeln!(writer, "    <timeout> {} </timeout>", socket.timeout)?;
    if let Some(active) = &socket.active {
        writeln!(writer, "    <activelist> {} </activelist>", fmt_vector(active))?;
    }
    writeln!(writer, "  </ffsocket>")
}

fn write_output(output: &OutputSpec, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "  <output prefix='{}'>", esc(&output.prefix))?;
    if let Some(properties) = &output.properties {
        writeln!(
            writer,
            "    <properties filename='{}' stride='{}'> {} </properties>",
            esc(&properties.filename),
            properties.stride,
            fmt_property_list(&properties.quantities)
        )?;
    }
    for trajectory in &output.trajectories {
        writeln!(
            writer,
            "    <trajectory filename='{}' stride='{}' format='{}'> {} </trajectory>",
            esc(&trajectory.filename),
            trajectory.stride,
            trajectory.format,
            esc(&trajectory.quantity)
        )?;
    }
    if let Some(checkpoint) = &output.checkpoint {
        writeln!(
            writer,
            "    <checkpoint filename='{}' stride='{}' overwrite='{}'/>",
            esc(&checkpoint.filename),
            checkpoint.stride,
            checkpoint.overwrite
        )?;
    }
    writeln!(writer, "  </output>")
}

fn write_initialize(sim: &Simulation, writer: &mut impl Write) -> io::Result<()> {
    let init = &sim.system.initialize;
    writeln!(writer, "    <initialize nbeads='{}'>", init.nbeads)?;
    if let Some(file) = &init.file {
        writeln!(
            writer,
            "      <file mode='{}'> {} </file>",
            file.format,
            esc(&file.path)
        )?;
    }
    if let Some(cell) = &init.cell {
        write_cell(cell, writer)?;
    }
    if let Some(VelocitySpec::Thermal { temperature }) = &init.velocities {
        writeln!(
            writer,
            "      <velocities mode='thermal'{}> {} </velocities>",
            units_attr(temperature),
            temperature.value
        )?;
    }
    writeln!(writer, "    </initialize>")
}

fn write_cell(cell: &Cell, writer: &mut impl Write) -> io::Result<()> {
    let units = match &cell.units {
        Some(unit) => format!(" units='{}'", esc(unit)),
        None => String::new(),
    };
    let (mode, numbers) = match &cell.shape {
        CellShape::Lengths(abc) => ("abc", abc.to_vec()),
        CellShape::LengthsAngles {
            lengths,
            angles_deg,
        } => {
            let mut v = lengths.to_vec();
            v.extend_from_slice(angles_deg);
            ("abcABC", v)
        }
        CellShape::Matrix(h) => ("h", h.transpose().as_slice().to_vec()),
    };
    writeln!(
        writer,
        "      <cell mode='{}'{}> {} </cell>",
        mode,
        units,
        fmt_vector(&numbers)
    )
}

fn write_force(entry: &ForceEntry, writer: &mut impl Write) -> io::Result<()> {
    let nbeads = match entry.nbeads {
        Some(n) => format!(" nbeads='{}'", n),
        None => String::new(),
    };
    if entry.weights.is_empty() {
        writeln!(
            writer,
            "      <force forcefield='{}'{}/>",
            esc(&entry.forcefield),
            nbeads
        )
    } else {
        writeln!(
            writer,
            "      <force forcefield='{}'{}>",
            esc(&entry.forcefield),
            nbeads
        )?;
        writeln!(
            writer,
            "        <mts_weights> {} </mts_weights>",
            fmt_vector(&entry.weights)
        )?;
        writeln!(writer, "      </force>")
    }
}

fn write_motion(motion: &MotionSpec, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "    <motion mode='{}'>", motion.mode)?;
    write_quantity("timestep", &motion.timestep, 6, writer)?;
    if let Some(thermostat) = &motion.thermostat {
        writeln!(writer, "      <thermostat mode='{}'>", thermostat.mode)?;
        write_quantity("tau", &thermostat.tau, 8, writer)?;
        writeln!(writer, "      </thermostat>")?;
    }
    writeln!(writer, "      <nmts> {} </nmts>", fmt_vector(&motion.nmts))?;
    writeln!(writer, "    </motion>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::reader::read_deck;
    use crate::model::{
        DynamicsMode, EnsembleSpec, FileFormat, FileSource, InitializeSpec, PropertiesOutput,
        SocketMode, Thermostat, ThermostatMode, TrajectoryFormat, TrajectoryOutput,
    };

    fn sample_deck() -> Simulation {
        let mut socket = ForceFieldSocket::new("qtip4pf", SocketMode::Unix, "h2o-driver");
        socket.active = Some(vec![0, 1, 2]);

        let mut output = OutputSpec::new("water");
        output.properties = Some(PropertiesOutput {
            filename: "props".to_string(),
            stride: 2,
            quantities: vec![
                PropertyRequest::bare("time"),
                PropertyRequest::in_unit("temperature", "kelvin"),
            ],
        });
        output.trajectories.push(TrajectoryOutput {
            filename: "pos".to_string(),
            stride: 10,
            format: TrajectoryFormat::Xyz,
            quantity: "positions".to_string(),
        });

        Simulation::builder()
            .total_steps(500)
            .seed(31415)
            .forcefield(socket)
            .output(output)
            .initialize(InitializeSpec {
                nbeads: 8,
                file: Some(FileSource {
                    format: FileFormat::Chk,
                    path: "start.chk".to_string(),
                }),
                cell: Some(Cell {
                    shape: CellShape::Lengths([18.6, 18.6, 18.6]),
                    units: Some("angstrom".to_string()),
                }),
                velocities: Some(VelocitySpec::Thermal {
                    temperature: Quantity::new(298.0, "kelvin"),
                }),
            })
            .force(ForceEntry {
                forcefield: "qtip4pf".to_string(),
                nbeads: Some(4),
                weights: vec![1.0, 0.0],
            })
            .motion(MotionSpec {
                mode: DynamicsMode::Nvt,
                timestep: Quantity::new(0.25, "femtosecond"),
                thermostat: Some(Thermostat {
                    mode: ThermostatMode::PileL,
                    tau: Quantity::new(100.0, "femtosecond"),
                }),
                nmts: vec![1, 4],
            })
            .ensemble(EnsembleSpec {
                temperature: Quantity::new(298.0, "kelvin"),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn written_deck_is_read_back_unchanged() {
        let deck = sample_deck();
        let mut buffer = Vec::new();
        write_deck(&deck, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let reparsed = read_deck(&text).unwrap();
        assert_eq!(reparsed, deck);
    }

    #[test]
    fn writer_spells_out_socket_defaults() {
        let deck = sample_deck();
        let mut buffer = Vec::new();
        write_deck(&deck, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("<port> 31415 </port>"));
        assert!(text.contains("<slots> 4 </slots>"));
        assert!(text.contains("pbc='true'"));
    }

    #[test]
    fn writer_escapes_reserved_characters() {
        let mut deck = sample_deck();
        deck.output.prefix = "a<b&c'd".to_string();
        let mut buffer = Vec::new();
        write_deck(&deck, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("prefix='a&lt;b&amp;c&apos;d'"));
        let reparsed = read_deck(&text).unwrap();
        assert_eq!(reparsed.output.prefix, "a<b&c'd");
    }

    #[test]
    fn property_list_round_trips_braced_units() {
        let deck = sample_deck();
        let mut buffer = Vec::new();
        write_deck(&deck, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("[ time, temperature{kelvin} ]"));
    }
}
