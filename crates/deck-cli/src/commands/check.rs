use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use pimdeck::io::read_deck_from_path;
use pimdeck::validate;
use tracing::{debug, info};

pub fn run(args: CheckArgs) -> Result<()> {
    info!("Checking deck '{}'.", args.input.display());
    let sim = read_deck_from_path(&args.input)?;
    debug!(
        "Parsed deck: {} force field(s), {} bead(s), {} step(s).",
        sim.forcefields.len(),
        sim.system.initialize.nbeads,
        sim.total_steps
    );

    let violations = validate::validate(&sim);
    if violations.is_empty() {
        println!("{}: deck is valid.", args.input.display());
        return Ok(());
    }

    super::report_violations(&args.input, &violations);
    Err(CliError::Invalid {
        count: violations.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const VALID_DECK: &str = "<simulation>\
        <total_steps>10</total_steps>\
        <ffsocket name='lj' mode='unix'><address>driver</address></ffsocket>\
        <output prefix='run'/>\
        <system>\
          <forces><force forcefield='lj'/></forces>\
          <motion mode='nve'><timestep units='femtosecond'>0.5</timestep></motion>\
          <ensemble><temperature units='kelvin'>300</temperature></ensemble>\
        </system>\
        </simulation>";

    #[test]
    fn check_accepts_a_valid_deck() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.xml");
        std::fs::write(&path, VALID_DECK).unwrap();

        let result = run(CheckArgs { input: path });
        assert!(result.is_ok());
    }

    #[test]
    fn check_rejects_a_deck_with_a_dangling_force_reference() {
        let deck = VALID_DECK.replace("forcefield='lj'", "forcefield='missing'");
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.xml");
        std::fs::write(&path, deck).unwrap();

        let result = run(CheckArgs { input: path });
        assert!(matches!(result, Err(CliError::Invalid { count: 1 })));
    }

    #[test]
    fn check_propagates_parse_failures() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<simulation><nonsense/></simulation>").unwrap();

        let result = run(CheckArgs { input: path });
        assert!(matches!(result, Err(CliError::Deck(_))));
    }
}
