//! Terminal escape sequences.
//!
//! The engine never interprets these; they are forwarded to the output
//! writer as-is.

/// Carriage return + line feed.
pub const CRLF: &str = "\r\n";
/// Clear the screen and home the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
/// White foreground.
pub const MAKE_WHITE: &str = "\x1b[37m";
/// Green foreground.
pub const MAKE_GREEN: &str = "\x1b[32m";
/// Red foreground.
pub const MAKE_RED: &str = "\x1b[31m";
/// Yellow foreground.
pub const MAKE_YELLOW: &str = "\x1b[33m";
/// Bold / bright.
pub const MAKE_BOLD: &str = "\x1b[1m";
/// Reset all attributes.
pub const CLEAR_ATTRIBUTES: &str = "\x1b[0m";
