//! Common error types for console operations

use core::fmt;

/// Every condition the engine reports through its error writer.
///
/// None of these are fatal: by the time one is returned from
/// [`Engine::add_keystroke`](super::Engine::add_keystroke) or
/// [`Engine::do_tasks`](super::Engine::do_tasks) it has already been
/// written to the error channel and the engine keeps running.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EngineError {
    /// A control character outside the handled set was received.
    UnsupportedCharacter(u8),
    /// The input line is full; the byte was dropped.
    BufferOverflow,
    /// Neither a command nor an application matched the typed name.
    NotFound,
    /// Two registry entries share a name.
    DuplicateName,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnsupportedCharacter(byte) => {
                write!(f, "ASCII character 0x{:02X} is not supported.", byte)
            }
            EngineError::BufferOverflow => f.write_str("Buffer overflow!"),
            EngineError::NotFound => f.write_str("Command not found"),
            EngineError::DuplicateName => f.write_str("Duplicate name in registry"),
        }
    }
}

impl core::error::Error for EngineError {}

#[cfg(feature = "defmt")]
impl defmt::Format for EngineError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EngineError::UnsupportedCharacter(byte) => {
                defmt::write!(f, "UnsupportedCharacter({=u8:#x})", *byte)
            }
            EngineError::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            EngineError::NotFound => defmt::write!(f, "NotFound"),
            EngineError::DuplicateName => defmt::write!(f, "DuplicateName"),
        }
    }
}
