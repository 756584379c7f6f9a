//! Character sources feeding the JSON tokenizer.
//!
//! [`CharSource`] is the four-primitive interface the tokenizer runs
//! against: read one character, peek one character, report a position, and
//! (when the backing store allows it) seek back to a reported position.
//! Three adapters cover the common inputs:
//!
//! - [`StrSource`] - borrowed text, always seekable, cheapest
//! - [`ByteSource`] - a byte stream decoded one character at a time, with
//!   a leading byte-order mark skipped; seekability comes from the
//!   stream's own [`Seek`] bound
//! - [`CharIterSource`] - any character iterator; never seekable

use std::io::{self, Read, Seek, SeekFrom};
use std::iter::Peekable;

use crate::error::{Error, Result};

/// Abstract one-character-at-a-time input.
pub trait CharSource {
    /// Consume and return the next character, or `None` at end of input.
    fn read(&mut self) -> Result<Option<char>>;

    /// Return the next character without consuming it.
    fn peek(&mut self) -> Result<Option<char>>;

    /// Current position, suitable for a later [`CharSource::seek`] when
    /// [`CharSource::can_seek`] is true.
    fn position(&self) -> u64;

    /// Whether [`CharSource::seek`] is available.
    fn can_seek(&self) -> bool {
        false
    }

    /// Reposition to a value previously returned by
    /// [`CharSource::position`].
    fn seek(&mut self, position: u64) -> Result<()> {
        let _ = position;
        Err(Error::Unsupported("this source cannot seek"))
    }
}

/// Source backed by a borrowed string. Positions are byte offsets.
#[derive(Debug)]
pub struct StrSource<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrSource<'a> {
    /// Wrap a string slice.
    pub fn new(text: &'a str) -> Self {
        StrSource { text, pos: 0 }
    }
}

impl CharSource for StrSource<'_> {
    fn read(&mut self) -> Result<Option<char>> {
        match self.text[self.pos..].chars().next() {
            Some(ch) => {
                self.pos += ch.len_utf8();
                Ok(Some(ch))
            }
            None => Ok(None),
        }
    }

    fn peek(&mut self) -> Result<Option<char>> {
        Ok(self.text[self.pos..].chars().next())
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn can_seek(&self) -> bool {
        true
    }

    fn seek(&mut self, position: u64) -> Result<()> {
        let position = position as usize;
        if position > self.text.len() || !self.text.is_char_boundary(position) {
            return Err(Error::InvalidState(
                "seek position is not a character boundary",
            ));
        }
        self.pos = position;
        Ok(())
    }
}

/// Source backed by a seekable byte stream, decoded as UTF-8 one character
/// at a time.
///
/// Exactly one decoded character is buffered for peeking; the reported
/// position is the stream offset minus that pending character's width, so
/// a seek back to it replays the peeked character. A byte-order mark at
/// offset zero is consumed silently. Malformed UTF-8 surfaces as an
/// [`io::ErrorKind::InvalidData`] error.
#[derive(Debug)]
pub struct ByteSource<R> {
    reader: R,
    /// Bytes consumed from the stream so far.
    consumed: u64,
    /// Decoded but unread character and its encoded width.
    pending: Option<(char, u8)>,
    /// Byte-order mark not yet checked for.
    at_start: bool,
}

impl<R: Read + Seek> ByteSource<R> {
    /// Wrap a byte stream positioned at the start of a JSON document.
    pub fn new(reader: R) -> Self {
        ByteSource {
            reader,
            consumed: 0,
            pending: None,
            at_start: true,
        }
    }

    /// Hand back the underlying stream, positioned after the last byte
    /// this source consumed from it.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.consumed += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Decode one character, returning it with its encoded byte width.
    fn decode_char(&mut self) -> Result<Option<(char, u8)>> {
        let lead = match self.next_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        if lead < 0x80 {
            return Ok(Some((char::from(lead), 1)));
        }

        let (width, mut code) = match lead {
            0xC0..=0xDF => (2u8, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
            0xF0..=0xF7 => (4, u32::from(lead & 0x07)),
            _ => return Err(invalid_utf8()),
        };
        for _ in 1..width {
            let byte = self.next_byte()?.ok_or_else(truncated_utf8)?;
            if byte & 0xC0 != 0x80 {
                return Err(invalid_utf8());
            }
            code = (code << 6) | u32::from(byte & 0x3F);
        }
        // Reject overlong encodings; from_u32 rejects surrogates.
        let minimum = match width {
            2 => 0x80,
            3 => 0x800,
            _ => 0x10000,
        };
        if code < minimum {
            return Err(invalid_utf8());
        }
        match char::from_u32(code) {
            Some(ch) => Ok(Some((ch, width))),
            None => Err(invalid_utf8()),
        }
    }

    fn fill_pending(&mut self) -> Result<()> {
        if self.pending.is_some() {
            return Ok(());
        }
        let mut decoded = self.decode_char()?;
        if self.at_start {
            self.at_start = false;
            if let Some(('\u{FEFF}', _)) = decoded {
                decoded = self.decode_char()?;
            }
        }
        self.pending = decoded;
        Ok(())
    }
}

fn invalid_utf8() -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::InvalidData,
        "stream is not valid UTF-8",
    ))
}

fn truncated_utf8() -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "stream ends inside a UTF-8 sequence",
    ))
}

impl<R: Read + Seek> CharSource for ByteSource<R> {
    fn read(&mut self) -> Result<Option<char>> {
        self.fill_pending()?;
        Ok(self.pending.take().map(|(ch, _)| ch))
    }

    fn peek(&mut self) -> Result<Option<char>> {
        self.fill_pending()?;
        Ok(self.pending.map(|(ch, _)| ch))
    }

    fn position(&self) -> u64 {
        match self.pending {
            Some((_, width)) => self.consumed - u64::from(width),
            None => self.consumed,
        }
    }

    fn can_seek(&self) -> bool {
        true
    }

    fn seek(&mut self, position: u64) -> Result<()> {
        self.reader.seek(SeekFrom::Start(position))?;
        self.consumed = position;
        self.pending = None;
        self.at_start = false;
        Ok(())
    }
}

/// Source backed by a character iterator; delegates read/peek and is
/// never seekable.
#[derive(Debug)]
pub struct CharIterSource<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    consumed: u64,
}

impl<I: Iterator<Item = char>> CharIterSource<I> {
    /// Wrap a character iterator.
    pub fn new(chars: I) -> Self {
        CharIterSource {
            chars: chars.peekable(),
            consumed: 0,
        }
    }
}

impl<I: Iterator<Item = char>> CharSource for CharIterSource<I> {
    fn read(&mut self) -> Result<Option<char>> {
        let ch = self.chars.next();
        if ch.is_some() {
            self.consumed += 1;
        }
        Ok(ch)
    }

    fn peek(&mut self) -> Result<Option<char>> {
        Ok(self.chars.peek().copied())
    }

    /// Characters consumed so far; not a seekable offset.
    fn position(&self) -> u64 {
        self.consumed
    }
}
