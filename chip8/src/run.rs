use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;

use vm8_core::{Machine, RandomSource, SeededRandom, CLOCK_SPEED, CPU_CYCLES_PER_TIMER_CYCLE};

use crate::display::frame_to_text;

/// How a single run should be driven
#[derive(Debug, Clone)]
pub struct Options {
    pub rom: PathBuf,
    pub cycles: Option<u64>,
    pub fast: bool,
    pub seed: Option<u64>,
    pub hold: Vec<u8>,
    pub render: bool,
}

pub fn run(options: &Options) -> Result<()> {
    let file = File::open(&options.rom)
        .with_context(|| format!("unable to open {}", options.rom.display()))?;
    let mut reader = BufReader::new(file);

    match options.seed {
        Some(seed) => drive(
            Machine::with_random(SeededRandom::new(seed)),
            &mut reader,
            options,
        ),
        None => drive(Machine::new(), &mut reader, options),
    }
}

fn drive<R: RandomSource>(
    mut machine: Machine<R>,
    reader: &mut dyn Read,
    options: &Options,
) -> Result<()> {
    machine.load_rom(reader).context("unable to load ROM")?;
    info!("successfully loaded {}", options.rom.display());

    for &key in &options.hold {
        machine.key_press(key);
    }

    // Set initial timing
    let cycle_time = Duration::from_nanos(CLOCK_SPEED);
    let mut last_cycle = Instant::now();
    let mut timer_counter: u8 = 0;
    let mut executed: u64 = 0;

    loop {
        if options.cycles.map_or(false, |limit| executed >= limit) {
            info!("stopping after {} cycles", executed);
            return Ok(());
        }

        let pc = machine.state().pc;
        machine
            .step()
            .with_context(|| format!("halted at pc {:#06X} after {} cycles", pc, executed))?;
        executed += 1;

        // Timers tick once every CPU_CYCLES_PER_TIMER_CYCLE cycles
        timer_counter += 1;
        if timer_counter == CPU_CYCLES_PER_TIMER_CYCLE {
            timer_counter = 0;
            machine.decrement_timers();
        }

        if options.render {
            if let Some(frame) = machine.take_frame() {
                println!("{}", frame_to_text(frame));
            }
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !options.fast && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }
}
