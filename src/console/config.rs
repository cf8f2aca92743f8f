//! Engine configuration, fixed at construction.

use super::writer::{ErrorStyle, WriterFn, Writers};

/// ASCII carriage return (0x0D), the default line terminator.
pub const ASCII_CR: u8 = 0x0D;
/// ASCII end-of-text (0x03), sent by Ctrl+C; the default interrupt key.
pub const ASCII_ETX: u8 = 0x03;

/// When the one-time intro text is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntroPolicy {
    /// The first byte after (re)initialization is a wake-up signal: it is
    /// discarded, the intro is written and the prompt follows. Nothing is
    /// printed before that byte arrives.
    #[default]
    OnFirstKeystroke,
    /// The intro and prompt are written by the first ticks after
    /// initialization and the first byte is ordinary input.
    OnInitialize,
}

/// Construction-time settings.
///
/// ```rust
/// use cmdengine::console::{EngineConfig, ErrorStyle, IntroPolicy};
///
/// let config = EngineConfig {
///     prompt: "keyer> ",
///     intro: Some("\r\nRemote keyer console\r\n"),
///     intro_policy: IntroPolicy::OnInitialize,
///     error_style: ErrorStyle::Highlighted,
///     ..EngineConfig::default()
/// };
/// assert_eq!(config.interrupt_key, 0x03);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig<'a> {
    /// Written whenever the engine is ready for a new line.
    pub prompt: &'a str,
    /// One-time greeting.
    pub intro: Option<&'a str>,
    /// When the greeting is written.
    pub intro_policy: IntroPolicy,
    /// Byte that submits the line.
    pub line_terminator: u8,
    /// Byte that discards the line or closes the focused application.
    pub interrupt_key: u8,
    /// Output channel; output is dropped when `None`.
    pub output: Option<WriterFn>,
    /// Error channel; reports are dropped when `None`.
    pub error: Option<WriterFn>,
    /// Decoration applied to error reports.
    pub error_style: ErrorStyle,
}

impl Default for EngineConfig<'_> {
    fn default() -> Self {
        Self {
            prompt: "$> ",
            intro: None,
            intro_policy: IntroPolicy::default(),
            line_terminator: ASCII_CR,
            interrupt_key: ASCII_ETX,
            output: None,
            error: None,
            error_style: ErrorStyle::default(),
        }
    }
}

impl EngineConfig<'_> {
    pub(crate) fn writers(&self) -> Writers {
        Writers {
            output: self.output,
            error: self.error,
            error_style: self.error_style,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IntroPolicy {
    fn format(&self, f: defmt::Formatter) {
        match self {
            IntroPolicy::OnFirstKeystroke => defmt::write!(f, "OnFirstKeystroke"),
            IntroPolicy::OnInitialize => defmt::write!(f, "OnInitialize"),
        }
    }
}
