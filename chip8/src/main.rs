use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use env_logger::Env;
use log::error;

mod display;
mod keymap;
mod run;

/// Runs a program headlessly on the virtual machine
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Program image to load at 0x200
    rom: PathBuf,

    /// Stop after this many cycles instead of running until a fault
    #[arg(short, long)]
    cycles: Option<u64>,

    /// Ignore the clock and run as fast as possible
    #[arg(short, long)]
    fast: bool,

    /// Seed for the random number generator, for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keyboard key to hold down for the whole run (1234/QWER/ASDF/ZXCV layout)
    #[arg(long, value_parser = keymap::parse_key)]
    hold: Vec<u8>,

    /// Print every new frame to stdout
    #[arg(short, long)]
    render: bool,
}

impl From<Args> for run::Options {
    fn from(args: Args) -> Self {
        run::Options {
            rom: args.rom,
            cycles: args.cycles,
            fast: args.fast,
            seed: args.seed,
            hold: args.hold,
            render: args.render,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run::run(&args.into()) {
        error!("{:#}", e);
        exit(1);
    }
}
