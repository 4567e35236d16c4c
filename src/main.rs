//=====================================================
// File: main.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: RedCode CLI entry point
// Objective: Command-line interface for running .red scripts, optionally
//            importing web bridge data first or dumping the linked program
//=====================================================

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};

use redcode::config::RuntimeConfig;
use redcode::modules::web::BridgeFile;
use redcode::{Interpreter, Program, logging};

#[derive(Parser, Debug)]
#[command(name = "redcode", about = "RedCode script interpreter")]
pub struct Args {
    /// Script to run. Defaults to the configured script (script.red).
    pub script: Option<PathBuf>,

    /// Import the web bridge file before running.
    #[arg(long)]
    pub web: bool,

    /// Configuration file to use instead of the default lookup.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log interpreter activity at trace level on stderr.
    #[arg(long)]
    pub trace: bool,

    /// Print the lines, jump table and function table, then exit.
    #[arg(long = "dump-links")]
    pub dump_links: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.trace);
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let (config, config_path) = RuntimeConfig::load(args.config.as_deref())?;
    debug!(config = ?config_path, "configuration resolved");

    let path = args.script.unwrap_or_else(|| config.script.clone());
    let program = match Program::load(&path) {
        Ok(program) => program,
        Err(err) => {
            println!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.dump_links {
        print!("{}", program.dump());
        return Ok(ExitCode::SUCCESS);
    }

    let mut bridge = args.web.then(|| BridgeFile::from_config(&config.bridge));
    let mut interpreter = Interpreter::with_config(program, config);
    if let Some(bridge) = bridge.as_mut() {
        if let Err(err) = interpreter.import_data(bridge) {
            warn!(error = %err, "web bridge import failed");
        }
    }

    interpreter.run();
    Ok(ExitCode::SUCCESS)
}

//=====================================================
// End of file
//=====================================================
