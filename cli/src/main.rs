mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, discover, info};
use lanscout_common::{ReconError, error};
use terminal::{print, spinner};

/// Exit status when the sweep found nothing.
const NO_DEVICES_STATUS: u8 = 2;
const FAILURE_STATUS: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    if let Err(e) = spinner::init_logging(commands.verbose) {
        eprintln!("failed to initialise logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(commands).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let status = exit_status(&e);
            if status != NO_DEVICES_STATUS {
                error!("{e:#}");
            }
            ExitCode::from(status)
        }
    }
}

/// 2 when the sweep found nothing, 1 for any other failure.
fn exit_status(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ReconError>().is_some_and(ReconError::is_terminal) {
        NO_DEVICES_STATUS
    } else {
        FAILURE_STATUS
    }
}

async fn run(commands: CommandLine) -> anyhow::Result<()> {
    let quiet = commands.quiet;
    match commands.command {
        Commands::Info => {
            print::header("about this host", quiet);
            info::info(quiet)
        }
        Commands::Discover(args) => {
            let cfg = args.to_config(quiet)?;
            if cfg.stress.enabled {
                print::header("stress run enabled", quiet);
            }
            discover::discover(args.subnet, cfg).await
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn empty_sweep_exits_with_two() {
        let e = anyhow::Error::from(ReconError::NoDevicesFound);
        assert_eq!(exit_status(&e), NO_DEVICES_STATUS);
    }

    #[test]
    fn context_does_not_hide_an_empty_sweep() {
        let result: Result<(), ReconError> = Err(ReconError::NoDevicesFound);
        let e = result.context("sweeping 10.0.0.0/24").unwrap_err();
        assert_eq!(exit_status(&e), NO_DEVICES_STATUS);
    }

    #[test]
    fn other_failures_exit_with_one() {
        let e = anyhow::Error::from(ReconError::RuleSet("bad json".into()));
        assert_eq!(exit_status(&e), FAILURE_STATUS);
        assert_eq!(exit_status(&anyhow::anyhow!("logging")), FAILURE_STATUS);
    }
}
