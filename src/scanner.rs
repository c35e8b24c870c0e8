//! Byte sources for the parser and the scratch buffer for literals.
//!
//! A [`Source`] hands out its input one window at a time. The [`Scanner`]
//! walks those windows byte by byte, refilling transparently, and keeps the
//! absolute offset of every byte so errors can point into the input.

use std::{
    fs::File,
    io::{self, Read},
    sync::LazyLock,
};

use log::debug;
use regex::Regex;

/// Window size for streamed input.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Initial capacity of the scratch buffer.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 4 * 1024;

/// Number of bytes shown on each side of an error offset.
const PREVIEW_RADIUS: usize = 10;

static CONTROL_BYTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1F\x7F]").expect("static pattern"));

/// An incremental byte source.
pub trait Source {
    /// Loads the next window of input and returns its length, or `None`
    /// once the input is exhausted. After the end, [`Source::window`] keeps
    /// returning the last window.
    fn refill(&mut self) -> io::Result<Option<usize>>;

    /// The bytes loaded by the most recent refill.
    fn window(&self) -> &[u8];
}

/// In-memory input: the first refill yields everything, the next one ends.
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    loaded: bool,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource {
            bytes,
            loaded: false,
        }
    }
}

impl Source for SliceSource<'_> {
    fn refill(&mut self) -> io::Result<Option<usize>> {
        if self.loaded {
            return Ok(None);
        }
        self.loaded = true;
        Ok(Some(self.bytes.len()))
    }

    fn window(&self) -> &[u8] {
        if self.loaded { self.bytes } else { &[] }
    }
}

/// Chunked input from any reader, read in bounded windows.
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
    len: usize,
    eof: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        ReaderSource {
            reader,
            buf: vec![0; chunk_size.max(1)],
            len: 0,
            eof: false,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.buf.len()
    }
}

impl ReaderSource<File> {
    /// File input with a window no larger than the file itself.
    pub fn from_file(file: File) -> io::Result<Self> {
        Self::from_file_with_chunk_size(file, DEFAULT_CHUNK_SIZE)
    }

    pub fn from_file_with_chunk_size(file: File, chunk_size: usize) -> io::Result<Self> {
        let size = file.metadata()?.len();
        let window = usize::try_from(size).map_or(chunk_size, |size| size.min(chunk_size));
        Ok(Self::with_chunk_size(file, window))
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn refill(&mut self) -> io::Result<Option<usize>> {
        if self.eof {
            return Ok(None);
        }
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(None);
                }
                Ok(n) => {
                    debug!("Refilled {} bytes", n);
                    self.len = n;
                    return Ok(Some(n));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn window(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Byte-at-a-time cursor over a [`Source`].
pub struct Scanner<S> {
    source: S,
    pos: usize,
    end: usize,
    base: usize,
    exhausted: bool,
}

impl<S: Source> Scanner<S> {
    pub fn new(source: S) -> Self {
        Scanner {
            source,
            pos: 0,
            end: 0,
            base: 0,
            exhausted: false,
        }
    }

    /// Returns the next byte, refilling the window as needed.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        while self.pos >= self.end {
            if self.exhausted {
                return Ok(None);
            }
            match self.source.refill()? {
                Some(n) => {
                    self.base += self.end;
                    self.pos = 0;
                    self.end = n;
                }
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }
        let b = self.source.window()[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }

    /// Absolute offset of the byte most recently returned.
    pub fn last_offset(&self) -> usize {
        (self.base + self.pos).saturating_sub(1)
    }

    /// Input around `offset` from the current window, control bytes removed.
    pub fn preview(&self, offset: usize) -> String {
        let window = self.source.window();
        let local = offset.saturating_sub(self.base).min(window.len());
        let from = local.saturating_sub(PREVIEW_RADIUS);
        let to = (local + PREVIEW_RADIUS).min(window.len());
        let text = String::from_utf8_lossy(&window[from..to]);
        CONTROL_BYTES.replace_all(&text, "").into_owned()
    }
}

/// Growable buffer for the literal currently being scanned.
///
/// Starts at a fixed capacity and doubles whenever a byte would not fit.
pub struct ScratchBuffer {
    bytes: Vec<u8>,
}

impl ScratchBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        ScratchBuffer {
            bytes: Vec::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, b: u8) {
        if self.bytes.len() == self.bytes.capacity() {
            self.bytes.reserve_exact(self.bytes.capacity());
        }
        self.bytes.push(b);
    }

    pub fn push_char(&mut self, c: char) {
        let mut utf8 = [0; 4];
        for b in c.encode_utf8(&mut utf8).bytes() {
            self.push(b);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Drains the buffer into a string. Invalid UTF-8 is replaced.
    pub fn take_string(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.bytes).into_owned();
        self.bytes.clear();
        text
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SCRATCH_CAPACITY)
    }
}
