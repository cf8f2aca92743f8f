//! Fixed-capacity input line.

use super::error::EngineError;

/// The in-progress input line.
///
/// Holds at most `N - 1` bytes; the slot after the last byte is always a
/// NUL terminator, so `len() < N` holds at every point.
#[derive(Debug)]
pub struct LineBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        const { assert!(N >= 2, "line buffer needs room for one byte and a terminator") };
        Self { buf: [0; N], len: 0 }
    }

    /// Number of bytes the line can hold.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Append one byte.
    ///
    /// Fails with [`EngineError::BufferOverflow`] when the line already holds
    /// `N - 1` bytes; the buffer is left unchanged.
    pub fn push(&mut self, byte: u8) -> Result<(), EngineError> {
        if self.len >= N - 1 {
            return Err(EngineError::BufferOverflow);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        self.buf[self.len] = 0;
        Ok(())
    }

    /// Remove the last character: every byte of it when the line ends in a
    /// complete UTF-8 character, otherwise one byte. Returns `false` if the
    /// line was already empty.
    pub fn backspace(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        let width = self.last_char().map_or(1, str::len);
        self.len -= width;
        self.buf[self.len] = 0;
        true
    }

    /// The last character, if the line ends in a complete UTF-8 character.
    ///
    /// `None` while a multi-byte character is still incomplete, or when the
    /// tail is not valid UTF-8.
    pub fn last_char(&self) -> Option<&str> {
        let bytes = self.as_bytes();
        let floor = bytes.len().saturating_sub(4);
        let start = (floor..bytes.len()).rev().find(|&i| bytes[i] & 0xC0 != 0x80)?;
        core::str::from_utf8(&bytes[start..]).ok()
    }

    /// Logically clear the line.
    pub fn clear(&mut self) {
        self.len = 0;
        self.buf[0] = 0;
    }

    /// Number of bytes in the line.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether another byte would overflow the line.
    pub fn is_full(&self) -> bool {
        self.len >= N - 1
    }

    /// Raw content, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Content as text, cut at the last valid UTF-8 boundary.
    pub fn as_str(&self) -> &str {
        let bytes = self.as_bytes();
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            // valid_up_to() always lands on a char boundary
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_read_back() {
        let mut line = LineBuffer::<8>::new();
        for &b in b"help" {
            line.push(b).unwrap();
        }
        assert_eq!(line.as_str(), "help");
        assert_eq!(line.len(), 4);
        assert_eq!(line.buf[4], 0);
    }

    #[test]
    fn push_stops_one_short_of_capacity() {
        let mut line = LineBuffer::<4>::new();
        assert_eq!(line.capacity(), 3);
        line.push(b'a').unwrap();
        line.push(b'b').unwrap();
        line.push(b'c').unwrap();
        assert!(line.is_full());
        assert_eq!(line.push(b'd'), Err(EngineError::BufferOverflow));
        assert_eq!(line.as_str(), "abc");
        assert_eq!(line.buf[3], 0);
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut line = LineBuffer::<4>::new();
        assert!(!line.backspace());
        assert!(line.is_empty());

        line.push(b'x').unwrap();
        assert!(line.backspace());
        assert!(line.is_empty());
        assert_eq!(line.as_str(), "");
    }

    #[test]
    fn clear_resets_length() {
        let mut line = LineBuffer::<16>::new();
        for &b in b"reset me" {
            line.push(b).unwrap();
        }
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.as_bytes(), b"");
    }

    #[test]
    fn invalid_utf8_tail_is_cut() {
        let mut line = LineBuffer::<16>::new();
        for &b in b"ok" {
            line.push(b).unwrap();
        }
        line.push(0xC3).unwrap();
        assert_eq!(line.as_bytes(), b"ok\xC3");
        assert_eq!(line.as_str(), "ok");
    }

    #[test]
    fn last_char_waits_for_complete_sequence() {
        let mut line = LineBuffer::<16>::new();
        line.push(b'a').unwrap();
        assert_eq!(line.last_char(), Some("a"));

        line.push(0xC3).unwrap();
        assert_eq!(line.last_char(), None);
        line.push(0xA9).unwrap();
        assert_eq!(line.last_char(), Some("é"));

        // stray continuation byte after a complete char
        line.push(0xA9).unwrap();
        assert_eq!(line.last_char(), None);
    }

    #[test]
    fn backspace_removes_whole_character() {
        let mut line = LineBuffer::<16>::new();
        for &b in "a€".as_bytes() {
            line.push(b).unwrap();
        }
        assert_eq!(line.len(), 4);
        assert!(line.backspace());
        assert_eq!(line.as_bytes(), b"a");

        // an incomplete sequence goes one byte at a time
        line.push(0xE2).unwrap();
        line.push(0x82).unwrap();
        assert!(line.backspace());
        assert_eq!(line.as_bytes(), b"a\xE2");
        assert!(line.backspace());
        assert_eq!(line.as_bytes(), b"a");
    }
}
