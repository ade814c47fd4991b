use std::io::{self, BufRead, Read};

/// Added to the second code of a NUL-prefixed special key so the combined
/// code stays clear of ordinary character codes.
pub const SPECIAL_KEY_OFFSET: u32 = 255;

pub const ESCAPE: char = '\u{1b}';

/// Longest stretch of a line thrown away after its first key.
pub const LINE_DISCARD_LIMIT: u64 = 4096;

/// One physical keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Function/cursor key reported by the console as NUL followed by `code`.
    Special(u8),
}

impl Key {
    pub fn code(self) -> u32 {
        match self {
            Key::Char(ch) => u32::from(ch),
            Key::Special(code) => u32::from(code) + SPECIAL_KEY_OFFSET,
        }
    }
}

pub trait KeySource {
    /// Blocks until a key is available. `Ok(None)` means the input is exhausted.
    fn read_key(&mut self) -> io::Result<Option<Key>>;
}

/// Reads keys from line-buffered input: the first key on the line is the
/// answer and the remainder of the line, terminator included, is discarded.
/// At most `LINE_DISCARD_LIMIT` bytes are discarded per key, so input without
/// line breaks is never drained.
#[derive(Debug)]
pub struct LineKeySource<R> {
    reader: R,
}

impl<R: BufRead> LineKeySource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn discard_line(&mut self) -> io::Result<()> {
        self.reader
            .by_ref()
            .take(LINE_DISCARD_LIMIT)
            .skip_until(b'\n')
            .map(drop)
    }
}

impl<R: BufRead> KeySource for LineKeySource<R> {
    fn read_key(&mut self) -> io::Result<Option<Key>> {
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };

        if first == 0 {
            let second = self.next_byte()?;
            if second != Some(b'\n') {
                self.discard_line()?;
            }
            return Ok(Some(Key::Special(second.unwrap_or(0))));
        }

        if first == b'\n' {
            return Ok(Some(Key::Char('\n')));
        }

        let mut encoded = [first, 0, 0, 0];
        let mut len = 1;
        while len < utf8_width(first) {
            match self.peek_byte()? {
                Some(byte) if byte & 0xC0 == 0x80 => {
                    self.reader.consume(1);
                    encoded[len] = byte;
                    len += 1;
                }
                _ => break,
            }
        }

        self.discard_line()?;
        Ok(String::from_utf8_lossy(&encoded[..len]).chars().next().map(Key::Char))
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
