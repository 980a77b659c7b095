use crate::cli::ShowArgs;
use crate::error::Result;
use pimdeck::io::read_deck_from_path;
use pimdeck::model::{Simulation, SocketMode, VelocitySpec};
use tracing::info;

pub fn run(args: ShowArgs) -> Result<()> {
    info!("Reading deck '{}'.", args.input.display());
    let sim = read_deck_from_path(&args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim)?);
        return Ok(());
    }

    print_summary(&sim);
    Ok(())
}

fn print_summary(sim: &Simulation) {
    println!(
        "simulation: {} steps, verbosity {}{}",
        sim.total_steps,
        sim.verbosity,
        match sim.seed {
            Some(seed) => format!(", seed {}", seed),
            None => String::new(),
        }
    );

    println!("force fields:");
    for socket in &sim.forcefields {
        let endpoint = match socket.mode {
            SocketMode::Unix => format!("unix socket '{}'", socket.address),
            SocketMode::Inet => format!("inet {}:{}", socket.address, socket.port),
        };
        let active = match &socket.active {
            Some(active) => format!(", {} active atom(s)", active.len()),
            None => String::new(),
        };
        println!(
            "  {:<12} {} (slots {}, pbc {}{})",
            socket.name, endpoint, socket.slots, socket.pbc, active
        );
    }

    let init = &sim.system.initialize;
    println!("system: {} bead(s)", init.nbeads);
    if let Some(file) = &init.file {
        println!("  start from {} file '{}'", file.format, file.path);
    }
    if let Some(cell) = &init.cell {
        match cell.volume() {
            Ok(volume) => println!(
                "  cell volume {} {}^3",
                volume,
                cell.units.as_deref().unwrap_or("atomic_unit")
            ),
            Err(e) => println!("  cell: {}", e),
        }
    }
    if let Some(VelocitySpec::Thermal { temperature }) = &init.velocities {
        println!("  thermal velocities at {}", temperature);
    }

    for entry in &sim.system.forces {
        let contraction = match entry.nbeads {
            Some(n) => format!(", contracted to {} bead(s)", n),
            None => String::new(),
        };
        println!("  force '{}'{}", entry.forcefield, contraction);
    }

    let motion = &sim.system.motion;
    print!("motion: {} with timestep {}", motion.mode, motion.timestep);
    if let Some(thermostat) = &motion.thermostat {
        print!(", {} thermostat (tau {})", thermostat.mode, thermostat.tau);
    }
    println!();
    println!("ensemble: temperature {}", sim.system.ensemble.temperature);

    println!("output: prefix '{}'", sim.output.prefix);
    if let Some(props) = &sim.output.properties {
        println!(
            "  properties '{}' every {} step(s), {} column(s)",
            props.filename,
            props.stride,
            props.quantities.len()
        );
    }
    for trajectory in &sim.output.trajectories {
        println!(
            "  trajectory '{}' ({}) every {} step(s): {}",
            trajectory.filename, trajectory.format, trajectory.stride, trajectory.quantity
        );
    }
    if let Some(checkpoint) = &sim.output.checkpoint {
        println!(
            "  checkpoint '{}' every {} step(s)",
            checkpoint.filename, checkpoint.stride
        );
    }
}
