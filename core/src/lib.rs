pub use constants::{CLOCK_SPEED, CPU_CYCLES_PER_TIMER_CYCLE};
pub use error::{Fault, LoadError};
pub use instruction::Instruction;
pub use machine::Machine;
pub use opcode::Opcode;
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use state::{FrameBuffer, Keypad, State};

pub mod constants;
mod error;
mod instruction;
mod machine;
mod opcode;
mod operations;
mod random;
pub mod state;
