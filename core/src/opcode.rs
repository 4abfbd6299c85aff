/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word, read as four nibbles `[f x y n]`:
///
/// | field    | bits  | meaning                                              |
/// |----------|-------|------------------------------------------------------|
/// | `family` | 12-15 | selects the group of related operations              |
/// | `x`      | 8-11  | register Vx, or the last register of V0..=Vx         |
/// | `y`      | 4-7   | register Vy                                          |
/// | `n`      | 0-3   | sprite height, or the operation within a family      |
/// | `kk`     | 0-7   | an immediate byte, or the operation within a family  |
/// | `addr`   | 0-11  | a memory address                                     |
///
/// Which fields matter depends on the family; decoding never fails.
pub trait Opcode {
    /// `(family, x, y, n)`, the shape instructions are matched on.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    fn family(&self) -> u8;

    fn x(&self) -> u8;

    fn y(&self) -> u8;

    fn n(&self) -> u8;

    fn kk(&self) -> u8;

    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> u8 {
        (self >> 8) as u8 & 0xF
    }

    fn y(&self) -> u8 {
        (self >> 4) as u8 & 0xF
    }

    fn n(&self) -> u8 {
        *self as u8 & 0xF
    }

    fn kk(&self) -> u8 {
        *self as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}
