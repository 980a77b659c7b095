use crate::cli::FmtArgs;
use crate::error::{CliError, Result};
use pimdeck::io::{read_deck_from_path, write_deck, write_deck_to_path};
use pimdeck::validate;
use tracing::info;

pub fn run(args: FmtArgs) -> Result<()> {
    let sim = read_deck_from_path(&args.input)?;

    if args.strict {
        let violations = validate::validate(&sim);
        if !violations.is_empty() {
            super::report_violations(&args.input, &violations);
            return Err(CliError::Invalid {
                count: violations.len(),
            });
        }
    }

    match &args.output {
        Some(path) => {
            write_deck_to_path(&sim, path)?;
            info!(
                "Normalized '{}' into '{}'.",
                args.input.display(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            write_deck(&sim, &mut stdout.lock())?;
        }
    }
    Ok(())
}
