#![warn(clippy::all, clippy::pedantic)]
use crate::error::{EditorError, Result};
use std::io::{self, ErrorKind, Read};

const ESC: u8 = 0x1b;

/// A single decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
}

/// Takes an ASCII letter.
/// Returns the byte the terminal sends for Ctrl plus that letter.
#[must_use]
pub const fn ctrl_key(c: u8) -> u8 {
    c & 0x1f
}

/// Decodes raw bytes from a byte source into `Key`s.
pub struct KeyReader<R> {
    input: R,
}

impl<R: Read> KeyReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Takes itself.
    /// Blocks until one key is available and returns it.
    ///
    /// # Errors
    ///
    /// Returns `InputRead` if the byte source reports a hard error
    /// while waiting for the first byte of a key.
    pub fn read_key(&mut self) -> Result<Key> {
        let c = loop {
            match self.read_byte() {
                Ok(Some(c)) => break c,
                Ok(None) => continue,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(EditorError::InputRead(e)),
            }
        };
        if c != ESC {
            return Ok(Key::Char(c));
        }
        let Some(first) = self.follow_up() else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.follow_up() else {
            return Ok(Key::Escape);
        };
        Ok(self.decode_escape(first, second))
    }

    /// Takes itself and the two bytes read after an escape.
    /// Maps the sequence to a navigation key, reading a trailing `~` if needed.
    fn decode_escape(&mut self, first: u8, second: u8) -> Key {
        match (first, second) {
            (b'[', digit @ b'0'..=b'9') => match self.follow_up() {
                Some(b'~') => tilde_key(digit),
                _ => Key::Escape,
            },
            (b'[', b'A') => Key::ArrowUp,
            (b'[', b'B') => Key::ArrowDown,
            (b'[', b'C') => Key::ArrowRight,
            (b'[', b'D') => Key::ArrowLeft,
            (b'[' | b'O', b'H') => Key::Home,
            (b'[' | b'O', b'F') => Key::End,
            _ => Key::Escape,
        }
    }

    /// Takes itself.
    /// Reads one byte of an escape sequence. Anything other than
    /// exactly one byte counts as the sequence having ended.
    fn follow_up(&mut self) -> Option<u8> {
        self.read_byte().ok().flatten()
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0; 1];
        match self.input.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}
