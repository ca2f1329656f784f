#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process};

mod commands;
mod file;
mod interact;

use commands::{Commands, OutputFormat};

use clap::{Args, Parser};
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts,
    } = Cli::parse();

    setup_errlog(global_opts.verbosity as usize, global_opts.quiet)?;

    if global_opts.interact {
        trace!("Interact mode enabled");
    }

    let message = command.execute(&global_opts)?;

    if !global_opts.quiet && !message.is_empty() {
        println!("{message}");
    }
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bookmeta")]
#[clap(about = "Look up and normalize book metadata by ISBN-10 or ISBN-13")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Write the records to this file instead of stdout
    #[clap(short, long, parse(from_os_str), global = true)]
    output: Option<PathBuf>,

    /// How the records are printed
    #[clap(long, arg_enum, default_value = "plain", global = true)]
    format: OutputFormat,

    /// The books API endpoint to query instead of Open Library's
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Enables interactive mode, which prompts for an ISBN when none is given.
    #[clap(short, long, global = true)]
    interact: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}
