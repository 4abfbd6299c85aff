/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Maximum depth of nested subroutine calls
pub const STACK_SIZE: usize = 16;

/// Number of general purpose registers (V0..VF)
pub const REGISTER_COUNT: usize = 16;

/// Index of the register doubling as the carry/borrow/collision flag
pub const FLAG_REGISTER: usize = 0xF;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Address where programs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;

/// Address of the first font glyph
pub const FONT_START: u16 = 0x000;

/// Bytes per font glyph; each glyph is 8 pixels wide and 5 rows tall
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Nanoseconds per CPU cycle; the CPU runs at roughly 500Hz
pub const CLOCK_SPEED: u64 = 2_000_000;

/// The timers count down at 60Hz, approximated as once every 8 CPU cycles
pub const CPU_CYCLES_PER_TIMER_CYCLE: u8 = 8;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, stored at `FONT_START`.
///
/// Each row is a byte whose high nibble holds the lit pixels, e.g. "0":
/// ```text
/// 11110000  ****
/// 10010000  *  *
/// 10010000  *  *
/// 10010000  *  *
/// 11110000  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
