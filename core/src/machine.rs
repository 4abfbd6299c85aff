use log::{debug, trace, warn};

use crate::constants::{KEY_COUNT, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::random::{RandomSource, ThreadRandom};
use crate::state::{FrameBuffer, Keypad, State};

/// # Machine
/// A virtual machine for the Chip-8 instruction set.
///
/// Tracks:
///  - the current `state`
///  - a source of random bytes for the RND instruction
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - stepping the CPU one instruction at a time
/// - counting down its timers
/// - inspecting its frame buffer for rendering by some display
///
/// Nothing here keeps time; whoever drives the machine decides how often to
/// step it and tick its timers, and what to do when a step faults.
pub struct Machine<R: RandomSource = ThreadRandom> {
    state: State,
    rng: R,
}

impl Machine<ThreadRandom> {
    pub fn new() -> Self {
        Machine::with_random(ThreadRandom)
    }
}

impl Default for Machine<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Machine<R> {
    pub fn with_random(rng: R) -> Self {
        Machine {
            state: State::new(),
            rng,
        }
    }

    /// Copies a program image into memory at `PROGRAM_START`
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        let start = PROGRAM_START as usize;
        let capacity = MEMORY_SIZE - start;
        if program.len() > capacity {
            return Err(LoadError::TooLarge {
                size: program.len(),
                capacity,
            });
        }
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        debug!("loaded {} byte program at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn std::io::Read) -> Result<(), LoadError> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Fetches the opcode at the pc and executes it
    pub fn step(&mut self) -> Result<(), Fault> {
        let op = self.fetch()?;
        self.execute(op)
    }

    /// Decodes and executes a single opcode.
    /// On failure the state is left as it was before the call.
    pub fn execute(&mut self, op: u16) -> Result<(), Fault> {
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        let instruction = Instruction::from_op(op)?;
        instruction.execute(&mut self.state, &mut self.rng)
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn fetch(&self) -> Result<u16, Fault> {
        let range = self.state.memory_range(self.state.pc, 2)?;
        let bytes = &self.state.memory[range];
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Counts both timers down by one, stopping at zero
    pub fn decrement_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the frame buffer changed since it was last taken
    pub fn should_draw(&self) -> bool {
        self.state.draw_flag
    }

    pub fn clear_draw_flag(&mut self) {
        self.state.draw_flag = false;
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, 0x1);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, 0x0);
    }

    /// Replaces the pressed status of every key at once
    pub fn set_keys(&mut self, keypad: &Keypad) {
        self.state.keypad = *keypad;
    }

    fn set_key(&mut self, key: u8, status: u8) {
        match self.state.keypad.get_mut(key as usize) {
            Some(slot) => {
                debug!("key {:X} {}", key, if status == 0 { "up" } else { "down" });
                *slot = status;
            }
            None => warn!("ignoring key {:#04X}; only 0..{:X} exist", key, KEY_COUNT - 1),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    #[test]
    fn test_machine_gets_op() {
        let mut machine = Machine::new();
        machine.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(machine.fetch(), Ok(0xAABB));
    }

    #[test]
    fn test_fetch_past_memory_faults() {
        let mut machine = Machine::new();
        machine.state.pc = 0x0FFF;
        assert_eq!(
            machine.step(),
            Err(Fault::MemoryBoundsViolation {
                address: 0x0FFF,
                extent: 2
            })
        );
    }

    #[test]
    fn test_steps() {
        let mut machine = Machine::new();
        let starting_pc = machine.state.pc;
        machine.state.memory[0x200..0x202].copy_from_slice(&[0x00, 0xE0]);
        machine.step().unwrap();
        assert_eq!(machine.state.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_load_program() {
        let mut machine = Machine::new();
        machine.load_program(&[0x12, 0x34, 0x56]).unwrap();
        assert_eq!(machine.state.memory[0x200..0x204], [0x12, 0x34, 0x56, 0x00]);
    }

    #[test]
    fn test_load_program_too_large() {
        let mut machine = Machine::new();
        let program = vec![0xFF; 0xE01];
        match machine.load_program(&program) {
            Err(LoadError::TooLarge { size, capacity }) => {
                assert_eq!(size, 0xE01);
                assert_eq!(capacity, 0xE00);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
        assert!(machine.state.memory[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_rom_reads_everything() {
        let mut machine = Machine::new();
        let mut rom: &[u8] = &[0x60, 0x0A, 0x70, 0x01];
        machine.load_rom(&mut rom).unwrap();
        assert_eq!(machine.state.memory[0x200..0x204], [0x60, 0x0A, 0x70, 0x01]);
    }

    #[test]
    fn test_decrements_timers_to_zero() {
        let mut machine = Machine::new();
        machine.state.delay_timer = 0x2;
        machine.state.sound_timer = 0x1;
        machine.decrement_timers();
        assert_eq!(machine.state.delay_timer, 0x1);
        assert_eq!(machine.state.sound_timer, 0x0);
        assert!(!machine.sound_active());
        machine.decrement_timers();
        machine.decrement_timers();
        assert_eq!(machine.state.delay_timer, 0x0);
        assert_eq!(machine.state.sound_timer, 0x0);
    }

    #[test]
    fn test_take_frame_clears_flag() {
        let mut machine = Machine::new();
        assert!(machine.take_frame().is_none());
        machine.execute(0x00E0).unwrap();
        assert!(machine.should_draw());
        assert!(machine.take_frame().is_some());
        assert!(!machine.should_draw());
        assert!(machine.take_frame().is_none());
    }

    #[test]
    fn test_captures_key_presses() {
        let mut machine = Machine::new();
        machine.key_press(0xE);
        assert_eq!(machine.state.keypad[0xE], 0x1);
        machine.key_release(0xE);
        assert_eq!(machine.state.keypad[0xE], 0x0);
    }

    #[test]
    fn test_ignores_unknown_keys() {
        let mut machine = Machine::new();
        machine.key_press(0x10);
        assert!(machine.state.keypad.iter().all(|&k| k == 0));
    }

    #[test]
    fn test_injected_random() {
        let mut machine = Machine::with_random(SequenceRandom::new([0x5A]));
        machine.execute(0xC3FF).unwrap();
        assert_eq!(machine.state().v[0x3], 0x5A);
    }
}
