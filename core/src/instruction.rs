use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations::{self, Outcome};
use crate::random::RandomSource;
use crate::state::State;

/// One decoded instruction along with the operands it needs.
///
/// Register operands are stored as indices so handlers can use them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1nnn`
    Jump { addr: u16 },
    /// `2nnn`
    Call { addr: u16 },
    /// `3xkk`
    SkipEqual { x: usize, kk: u8 },
    /// `4xkk`
    SkipNotEqual { x: usize, kk: u8 },
    /// `5xy0`
    SkipRegistersEqual { x: usize, y: usize },
    /// `6xkk`
    Load { x: usize, kk: u8 },
    /// `7xkk`
    Add { x: usize, kk: u8 },
    /// `8xy0`
    Move { x: usize, y: usize },
    /// `8xy1`
    Or { x: usize, y: usize },
    /// `8xy2`
    And { x: usize, y: usize },
    /// `8xy3`
    Xor { x: usize, y: usize },
    /// `8xy4`
    AddRegisters { x: usize, y: usize },
    /// `8xy5`
    Sub { x: usize, y: usize },
    /// `8xy6`
    ShiftRight { x: usize },
    /// `8xy7`
    SubNegated { x: usize, y: usize },
    /// `8xyE`
    ShiftLeft { x: usize },
    /// `9xy0`
    SkipRegistersNotEqual { x: usize, y: usize },
    /// `Annn`
    LoadIndex { addr: u16 },
    /// `Bnnn`
    JumpOffset { addr: u16 },
    /// `Cxkk`
    Random { x: usize, kk: u8 },
    /// `Dxyn`
    Draw { x: usize, y: usize, n: u8 },
    /// `Ex9E`
    SkipPressed { word: u16, x: usize },
    /// `ExA1`
    SkipReleased { word: u16, x: usize },
    /// `Fx07`
    LoadDelay { x: usize },
    /// `Fx0A`
    WaitKey { x: usize },
    /// `Fx15`
    SetDelay { x: usize },
    /// `Fx18`
    SetSound { x: usize },
    /// `Fx1E`
    AddIndex { x: usize },
    /// `Fx29`
    LoadGlyph { x: usize },
    /// `Fx33`
    StoreBcd { x: usize },
    /// `Fx55`
    StoreRegisters { x: usize },
    /// `Fx65`
    ReadRegisters { x: usize },
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn from_op(op: u16) -> Result<Instruction, Fault> {
        use Instruction::*;

        let x = op.x() as usize;
        let y = op.y() as usize;
        let kk = op.kk();
        let addr = op.addr();

        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEqual { x, kk },
            (0x4, ..) => SkipNotEqual { x, kk },
            (0x5, .., 0x0) => SkipRegistersEqual { x, y },
            (0x5, ..) => return Err(Fault::MalformedOperand { word: op }),
            (0x6, ..) => Load { x, kk },
            (0x7, ..) => Add { x, kk },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddRegisters { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubNegated { x, y },
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, .., 0x0) => SkipRegistersNotEqual { x, y },
            (0x9, ..) => return Err(Fault::MalformedOperand { word: op }),
            (0xA, ..) => LoadIndex { addr },
            (0xB, ..) => JumpOffset { addr },
            (0xC, ..) => Random { x, kk },
            (0xD, .., n) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipPressed { word: op, x },
            (0xE, _, 0xA, 0x1) => SkipReleased { word: op, x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => ReadRegisters { x },
            (family, ..) => return Err(Fault::UnknownOpcode { word: op, family }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`, drawing from `rng` only for `Cxkk`.
    pub fn execute(self, state: &mut State, rng: &mut impl RandomSource) -> Outcome {
        use Instruction::*;

        match self {
            Clear => operations::clr(state),
            Return => operations::rts(state),
            Jump { addr } => operations::jump(state, addr),
            Call { addr } => operations::call(state, addr),
            SkipEqual { x, kk } => operations::ske(state, x, kk),
            SkipNotEqual { x, kk } => operations::skne(state, x, kk),
            SkipRegistersEqual { x, y } => operations::skre(state, x, y),
            Load { x, kk } => operations::load(state, x, kk),
            Add { x, kk } => operations::add(state, x, kk),
            Move { x, y } => operations::mv(state, x, y),
            Or { x, y } => operations::or(state, x, y),
            And { x, y } => operations::and(state, x, y),
            Xor { x, y } => operations::xor(state, x, y),
            AddRegisters { x, y } => operations::addr(state, x, y),
            Sub { x, y } => operations::sub(state, x, y),
            ShiftRight { x } => operations::shr(state, x),
            SubNegated { x, y } => operations::subn(state, x, y),
            ShiftLeft { x } => operations::shl(state, x),
            SkipRegistersNotEqual { x, y } => operations::skrne(state, x, y),
            LoadIndex { addr } => operations::loadi(state, addr),
            JumpOffset { addr } => operations::jumpi(state, addr),
            Random { x, kk } => operations::rand(state, rng, x, kk),
            Draw { x, y, n } => operations::draw(state, x, y, n),
            SkipPressed { word, x } => operations::skpr(state, word, x),
            SkipReleased { word, x } => operations::skup(state, word, x),
            LoadDelay { x } => operations::moved(state, x),
            WaitKey { x } => operations::keyd(state, x),
            SetDelay { x } => operations::loads(state, x),
            SetSound { x } => operations::ld(state, x),
            AddIndex { x } => operations::addi(state, x),
            LoadGlyph { x } => operations::ldspr(state, x),
            StoreBcd { x } => operations::bcd(state, x),
            StoreRegisters { x } => operations::stor(state, x),
            ReadRegisters { x } => operations::read(state, x),
        }
    }
}
