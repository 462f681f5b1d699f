// SPDX-License-Identifier: MPL-2.0
//! Minimal command-line shell around the viewer controller.
//!
//! Opens the image given as the positional argument, prints the status line
//! and command availability, and optionally re-encodes the image with
//! `--save-as`. A failed initial open is a hard failure: the error is
//! printed and the process exits non-zero.

use photo_lens::config;
use photo_lens::viewer::{CommandId, ViewerController};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
photo_lens - single-image viewer core

USAGE:
  photo_lens [OPTIONS] [filepath]

ARGS:
  [filepath]          The filepath to the image to view.

OPTIONS:
  --save-as <path>    Re-encode the opened image to <path>.
  -h, --help          Print this help.
";

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let save_as: Option<PathBuf> = match args.opt_value_from_str("--save-as") {
        Ok(value) => value,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    let config = config::load().unwrap_or_default();
    let mut controller = ViewerController::new(&config);

    let Some(path) = file_path else {
        if save_as.is_some() {
            eprintln!("--save-as requires an image to open");
            return ExitCode::FAILURE;
        }
        print!("{HELP}");
        return ExitCode::SUCCESS;
    };

    if controller.open_file(&path).is_err() {
        eprintln!("{}", controller.status());
        return ExitCode::FAILURE;
    }
    println!("{}", controller.status());

    for id in CommandId::ALL {
        let state = if controller.availability().is_enabled(id) {
            "enabled"
        } else {
            "disabled"
        };
        println!("  {:<14} {state}", id.name());
    }

    if let Some(target) = save_as {
        if controller.save_file(&target).is_err() {
            eprintln!("{}", controller.status());
            return ExitCode::FAILURE;
        }
        println!("{}", controller.status());
    }

    ExitCode::SUCCESS
}
