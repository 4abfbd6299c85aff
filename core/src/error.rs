use thiserror::Error;

/// Reasons a single instruction can fail to execute.
///
/// Every guard runs before the instruction mutates anything, so a `Fault`
/// always leaves the machine exactly as it was before the failed step.
/// Whether a fault halts the machine is up to whoever is driving it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("unknown opcode {word:#06X} in family {family:#X}")]
    UnknownOpcode { word: u16, family: u8 },

    #[error("stack overflow")]
    StackOverflow,

    #[error("stack underflow")]
    StackUnderflow,

    #[error("malformed operand in opcode {word:#06X}")]
    MalformedOperand { word: u16 },

    #[error("memory access of {extent} byte(s) at {address:#06X} is out of bounds")]
    MemoryBoundsViolation { address: u16, extent: usize },
}

/// Reasons a program image can't be placed in memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),

    #[error("program is {size} bytes but only {capacity} bytes are available")]
    TooLarge { size: usize, capacity: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages_carry_context() {
        let fault = Fault::UnknownOpcode {
            word: 0x0123,
            family: 0x0,
        };
        assert_eq!(fault.to_string(), "unknown opcode 0x0123 in family 0x0");

        let fault = Fault::MemoryBoundsViolation {
            address: 0x0FFE,
            extent: 3,
        };
        assert_eq!(
            fault.to_string(),
            "memory access of 3 byte(s) at 0x0FFE is out of bounds"
        );
    }
}
