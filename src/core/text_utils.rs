// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Shared text utilities for line classification.

/// Check if a byte is a LuaASM word character (letter, digit, or underscore).
#[inline]
pub fn is_word_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Check if a byte is whitespace (space or tab).
#[inline]
pub fn is_space(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// A simple cursor for scanning a single source line byte-by-byte.
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the input.
    pub fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Get the current position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Skip whitespace characters.
    pub fn skip_ws(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Peek at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consume the given byte if it is next, returning whether it was.
    pub fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Whether the cursor has consumed the whole line.
    pub fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Try to consume a run of word characters, returning it if non-empty.
    pub fn take_word(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos]).ok()
    }

    /// Consume the rest of the line verbatim.
    pub fn rest(&mut self) -> &'a str {
        let start = self.pos;
        self.pos = self.bytes.len();
        std::str::from_utf8(&self.bytes[start..]).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_word_char() {
        assert!(is_word_char(b'a'));
        assert!(is_word_char(b'Z'));
        assert!(is_word_char(b'0'));
        assert!(is_word_char(b'_'));
        assert!(!is_word_char(b'.'));
        assert!(!is_word_char(b'('));
    }

    #[test]
    fn test_cursor_take_word() {
        let mut cursor = Cursor::new("  foo bar");
        cursor.skip_ws();
        assert_eq!(cursor.take_word(), Some("foo"));
        cursor.skip_ws();
        assert_eq!(cursor.take_word(), Some("bar"));
        assert!(cursor.at_end());
    }

    #[test]
    fn test_cursor_eat() {
        let mut cursor = Cursor::new("[a]");
        assert!(cursor.eat(b'['));
        assert!(!cursor.eat(b'['));
        assert_eq!(cursor.take_word(), Some("a"));
        assert!(cursor.eat(b']'));
        assert!(cursor.at_end());
    }

    #[test]
    fn test_cursor_rest() {
        let mut cursor = Cursor::new("asm(mov eax, 1)");
        cursor.take_word();
        assert_eq!(cursor.rest(), "(mov eax, 1)");
        assert!(cursor.at_end());
    }
}
