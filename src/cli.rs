// cli.rs - Command Line Interface
//
// Flags map one-to-one onto `CaptureSettings`. Every flag overrides itself
// and the output flags override each other, so repeats are fine and the
// last output flag wins. Parse failures exit with `exit::USAGE`.

use clap::Parser;

use crate::app::{CaptureMode, CaptureSettings, OutputMode};
use crate::constants::capture::{DEFAULT_BUTTON, MAX_BUTTON};
use crate::constants::exit;

const OUTPUT_HEADING: &str = "Output options (mutually exclusive)";

#[derive(Parser, Debug)]
#[command(name = "clickgrab", version, args_override_self = true)]
#[command(about = "Grab the pointer and print the clicked point or dragged rectangle")]
pub struct Cli {
    /// Grab pointer (else grab button)
    #[arg(short = 'G', long)]
    pub grab: bool,

    /// Report motion events
    #[arg(short, long)]
    pub motion: bool,

    /// Print window id (always in json)
    #[arg(short, long)]
    pub window: bool,

    /// Button to intercept when grabbing a button
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BUTTON,
        value_parser = clap::value_parser!(u8).range(1..=(MAX_BUTTON as i64))
    )]
    pub button: u8,

    /// Print press position
    #[arg(short, long, help_heading = OUTPUT_HEADING,
          overrides_with_all = ["release", "geometry", "json"])]
    pub press: bool,

    /// Print release position (default)
    #[arg(short, long, help_heading = OUTPUT_HEADING,
          overrides_with_all = ["press", "geometry", "json"])]
    pub release: bool,

    /// Print geometry of selected rectangle (WxH+X+Y)
    #[arg(short, long, help_heading = OUTPUT_HEADING,
          overrides_with_all = ["press", "release", "json"])]
    pub geometry: bool,

    /// Print all data in JSON
    #[arg(short, long, help_heading = OUTPUT_HEADING,
          overrides_with_all = ["press", "release", "geometry"])]
    pub json: bool,
}

impl Cli {
    pub fn capture_mode(&self) -> CaptureMode {
        if self.grab {
            CaptureMode::ExclusivePointer
        } else {
            CaptureMode::ButtonScoped
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.press {
            OutputMode::PressOnly
        } else if self.geometry {
            OutputMode::Geometry
        } else if self.json {
            OutputMode::StructuredJson
        } else {
            OutputMode::ReleaseOnly
        }
    }

    pub fn settings(&self) -> CaptureSettings {
        CaptureSettings {
            capture_mode: self.capture_mode(),
            output_mode: self.output_mode(),
            report_motion: self.motion,
            print_window: self.window,
            button: self.button,
        }
    }
}

/// Exit status for a failed parse: help and version requests are not errors
pub fn parse_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        exit::USAGE
    } else {
        exit::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<CaptureSettings, clap::Error> {
        Cli::try_parse_from(std::iter::once("clickgrab").chain(args.iter().copied()))
            .map(|cli| cli.settings())
    }

    #[test]
    fn defaults_are_button_grab_printing_release() {
        let settings = parse(&[]).unwrap();
        assert_eq!(settings.capture_mode, CaptureMode::ButtonScoped);
        assert_eq!(settings.output_mode, OutputMode::ReleaseOnly);
        assert!(!settings.report_motion);
        assert!(!settings.print_window);
        assert_eq!(settings.button, DEFAULT_BUTTON);
    }

    #[test]
    fn combined_short_flags() {
        let settings = parse(&["-Gmwg"]).unwrap();
        assert_eq!(settings.capture_mode, CaptureMode::ExclusivePointer);
        assert!(settings.report_motion);
        assert!(settings.print_window);
        assert_eq!(settings.output_mode, OutputMode::Geometry);
    }

    #[test]
    fn last_output_flag_wins() {
        assert_eq!(parse(&["-g", "-p"]).unwrap().output_mode, OutputMode::PressOnly);
        assert_eq!(
            parse(&["--press", "--json"]).unwrap().output_mode,
            OutputMode::StructuredJson
        );
        assert_eq!(parse(&["-jr"]).unwrap().output_mode, OutputMode::ReleaseOnly);
        assert_eq!(parse(&["-g", "-g"]).unwrap().output_mode, OutputMode::Geometry);
        assert_eq!(parse(&["-gg"]).unwrap().output_mode, OutputMode::Geometry);
        assert_eq!(
            parse(&["-p", "--release", "-p"]).unwrap().output_mode,
            OutputMode::PressOnly
        );
    }

    #[test]
    fn repeated_switches_are_accepted() {
        let settings = parse(&["-GG", "-mm", "-w", "--window"]).unwrap();
        assert_eq!(settings.capture_mode, CaptureMode::ExclusivePointer);
        assert!(settings.report_motion);
        assert!(settings.print_window);
        assert!(parse(&["-G", "-G"]).is_ok());
    }

    #[test]
    fn usage_errors_map_to_usage_status() {
        let err = Cli::try_parse_from(["clickgrab", "--nope"]).unwrap_err();
        assert_eq!(parse_exit_code(&err), exit::USAGE);
        let help = Cli::try_parse_from(["clickgrab", "--help"]).unwrap_err();
        assert_eq!(parse_exit_code(&help), exit::SUCCESS);
    }

    #[test]
    fn unknown_flag_is_usage_error() {
        let err = parse(&["--frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(err.exit_code(), 2);

        let err = parse(&["-x"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn positional_argument_is_rejected() {
        let err = parse(&["geometry"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn help_exits_zero() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
        assert_eq!(parse(&["-h"]).unwrap_err().exit_code(), 0);
    }

    #[test]
    fn button_must_be_a_core_button() {
        assert_eq!(parse(&["-b", "3"]).unwrap().button, 3);
        assert!(parse(&["--button", "0"]).is_err());
        assert!(parse(&["--button", "9"]).is_err());
    }
}
