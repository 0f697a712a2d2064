// main.rs - clickgrab Application Entry Point
//
// Orchestrates one capture run:
// 1. Connect to the X server and build the capture session
// 2. Install the signal teardown, then grab the pointer or button
// 3. Run the event loop until a result is printed, then release the grab

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use clickgrab::cli::{parse_exit_code, Cli};
use clickgrab::constants::exit;
use clickgrab::{
    teardown, CaptureError, CaptureMachine, CaptureOutcome, CaptureSession, CaptureSettings,
    X11Server,
};

fn run(settings: CaptureSettings) -> Result<CaptureOutcome> {
    let server = X11Server::connect(None)?;
    let session = Arc::new(CaptureSession::new(
        server,
        settings.capture_mode,
        settings.button,
    ));

    let watcher = teardown::install(Arc::clone(&session))
        .context("Failed to install signal handlers")?;

    if let Err(e) = session.acquire() {
        watcher.uninstall();
        return Err(e.into());
    }

    let outcome = CaptureMachine::new(&*session, settings, io::stdout().lock()).run();
    let released = session.release();
    watcher.uninstall();

    let outcome = match (outcome, released) {
        (Ok(outcome), Ok(_)) => outcome,
        (Ok(_), Err(e)) => return Err(e.into()),
        (Err(e), Ok(_)) => return Err(e.into()),
        (Err(e), Err(release_err)) => {
            warn!("Failed to release grab: {}", release_err);
            return Err(e.into());
        }
    };
    Ok(outcome)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_exit_code(&e));
        }
    };

    // Quiet by default; RUST_LOG=debug traces grabs and events
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    info!("clickgrab starting...");

    match run(cli.settings()) {
        Ok(outcome) => {
            info!("Capture finished: {:?}", outcome);
            ExitCode::from(exit::SUCCESS)
        }
        Err(e) => {
            debug!("Capture failed: {:?}", e);
            // Printed directly so the diagnostic survives any log filter
            let code = match e.downcast_ref::<CaptureError>() {
                Some(err) => err.report(io::stderr()),
                None => {
                    eprintln!("{:#}", e);
                    exit::CONNECTION
                }
            };
            ExitCode::from(code)
        }
    }
}
