use std::ops::Range;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, KEY_COUNT, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT, SPRITE_SHEET, STACK_SIZE,
};
use crate::error::Fault;

/// The display contents, one byte per pixel (1 lit, 0 dark).
/// Row-major: the pixel at (x, y) lives at `x + y * DISPLAY_WIDTH`.
pub type FrameBuffer = [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// Pressed status of keys 0..F (nonzero pressed, zero released)
pub type Keypad = [u8; KEY_COUNT];

/// The complete machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - all 16 are general purpose
///     - the 16th (VF) doubles as the carry, not-borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), counted down from outside the CPU
///
/// ## Memory
/// - a stack of 16 return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the font
///     - programs are loaded at 0x200
/// - a 64x32 frame buffer along with a flag marking it as needing a redraw
///
/// ## Input
/// - the pressed status of keys 0..F
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: Keypad,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: [0; KEY_COUNT],
        }
    }

    /// Returns the memory range `address..address + extent` if it lies entirely in memory.
    pub fn memory_range(&self, address: u16, extent: usize) -> Result<Range<usize>, Fault> {
        let start = address as usize;
        let end = start + extent;
        if end > MEMORY_SIZE {
            return Err(Fault::MemoryBoundsViolation { address, extent });
        }
        Ok(start..end)
    }

    /// The value of the pixel at (x, y); coordinates wrap around the display edges.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame_buffer[pixel_index(x, y)]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Index into a FrameBuffer of the pixel at (x, y), wrapping both coordinates.
pub fn pixel_index(x: usize, y: usize) -> usize {
    (x % DISPLAY_WIDTH) + (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loads_font() {
        let state = State::new();
        assert_eq!(state.memory[0..80], SPRITE_SHEET);
        assert!(state.memory[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_starts_at_program() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert!(!state.draw_flag);
    }

    #[test]
    fn test_memory_range_in_bounds() {
        let state = State::new();
        assert_eq!(state.memory_range(0xFFD, 3), Ok(0xFFD..0x1000));
    }

    #[test]
    fn test_memory_range_out_of_bounds() {
        let state = State::new();
        assert_eq!(
            state.memory_range(0xFFE, 3),
            Err(Fault::MemoryBoundsViolation {
                address: 0xFFE,
                extent: 3
            })
        );
    }

    #[test]
    fn test_pixel_index_wraps() {
        assert_eq!(pixel_index(0, 0), 0);
        assert_eq!(pixel_index(64, 32), 0);
        assert_eq!(pixel_index(65, 1), 65);
    }
}
