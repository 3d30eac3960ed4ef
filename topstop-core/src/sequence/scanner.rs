use std::io::{self, ErrorKind, Read};

use crate::constants::{HEADER_MARKER, SCAN_CHUNK_LEN};
use crate::sequence::ring::UnitRing;
use crate::types::{Dinucleotide, Position};

/// One sliding window over the sequence body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub position: Position,
    /// Lowercased units at `position` and `position + 1`.
    pub units: Dinucleotide,
}

/// Streaming sliding-window reader over a sequence source.
///
/// The source is read in fixed-size chunks, so memory stays bounded no matter
/// how large the input is. Leading `>` lines are collected as the header;
/// control bytes anywhere in the body are skipped without taking a position.
///
/// # Examples
///
/// ```rust
/// use topstop_core::sequence::SequenceScanner;
///
/// let mut scanner = SequenceScanner::new(&b">chr1\nACG\nT\n"[..])?;
/// assert_eq!(scanner.header(), ">chr1");
///
/// let windows: Vec<_> = scanner.by_ref().collect::<Result<_, _>>()?;
/// assert_eq!(windows.len(), 3);
/// assert_eq!(&windows[2].units, b"gt");
/// assert_eq!(scanner.positions(), 3);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct SequenceScanner<R> {
    source: R,
    chunk: Box<[u8]>,
    filled: usize,
    cursor: usize,
    bytes_consumed: u64,
    ring: UnitRing,
    next_position: Position,
    header: String,
}

impl<R: Read> SequenceScanner<R> {
    /// Creates a scanner and consumes the header, if any.
    pub fn new(source: R) -> io::Result<Self> {
        Self::with_chunk_len(source, SCAN_CHUNK_LEN)
    }

    /// Same as [`new`](Self::new) with an explicit chunk size.
    pub fn with_chunk_len(source: R, chunk_len: usize) -> io::Result<Self> {
        let mut scanner = Self {
            source,
            chunk: vec![0; chunk_len.max(1)].into_boxed_slice(),
            filled: 0,
            cursor: 0,
            bytes_consumed: 0,
            ring: UnitRing::new(),
            next_position: 0,
            header: String::new(),
        };
        scanner.read_header()?;
        Ok(scanner)
    }

    /// Header lines found at the start of the input, concatenated.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Raw bytes read so far, header and control bytes included.
    #[must_use]
    pub const fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    /// Number of windows produced so far.
    #[must_use]
    pub const fn positions(&self) -> Position {
        self.next_position
    }

    /// Returns the next window, or `None` at end of input.
    pub fn next_window(&mut self) -> io::Result<Option<Window>> {
        while let Some(byte) = self.next_byte()? {
            if byte.is_ascii_control() {
                continue;
            }
            if let Some(units) = self.ring.push(byte.to_ascii_lowercase()) {
                let position = self.next_position;
                self.next_position += 1;
                return Ok(Some(Window { position, units }));
            }
        }
        Ok(None)
    }

    fn read_header(&mut self) -> io::Result<()> {
        while self.peek_byte()? == Some(HEADER_MARKER) {
            let mut line = Vec::new();
            while let Some(byte) = self.next_byte()? {
                if byte == b'\n' {
                    break;
                }
                line.push(byte);
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            self.header.push_str(&String::from_utf8_lossy(&line));
        }
        Ok(())
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if self.cursor == self.filled && !self.refill()? {
            return Ok(None);
        }
        Ok(Some(self.chunk[self.cursor]))
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.cursor += 1;
            self.bytes_consumed += 1;
        }
        Ok(byte)
    }

    fn refill(&mut self) -> io::Result<bool> {
        loop {
            match self.source.read(&mut self.chunk) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.filled = n;
                    self.cursor = 0;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Iterator for SequenceScanner<R> {
    type Item = io::Result<Window>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_window().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(input: &[u8], chunk_len: usize) -> (String, Vec<Window>) {
        let mut scanner = SequenceScanner::with_chunk_len(input, chunk_len).unwrap();
        let windows = scanner.by_ref().collect::<io::Result<Vec<_>>>().unwrap();
        (scanner.header().to_string(), windows)
    }

    fn texts(windows: &[Window]) -> Vec<String> {
        windows
            .iter()
            .map(|w| String::from_utf8_lossy(&w.units).into_owned())
            .collect()
    }

    #[test]
    fn test_dense_positions_without_header() {
        let (header, windows) = units(b"atatat", SCAN_CHUNK_LEN);
        assert!(header.is_empty());
        assert_eq!(texts(&windows), vec!["at", "ta", "at", "ta", "at"]);
        let positions: Vec<_> = windows.iter().map(|w| w.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_header_and_control_bytes_are_skipped() {
        let (header, windows) = units(b">seq one\r\nAC\r\nG\tT\n", SCAN_CHUNK_LEN);
        assert_eq!(header, ">seq one");
        assert_eq!(texts(&windows), vec!["ac", "cg", "gt"]);
        assert_eq!(windows.last().unwrap().position, 2);
    }

    #[test]
    fn test_consecutive_header_lines_concatenate() {
        let (header, windows) = units(b">a\n>b\nccc", SCAN_CHUNK_LEN);
        assert_eq!(header, ">a>b");
        assert_eq!(windows.len(), 2);
    }

    #[test]
    fn test_marker_after_body_start_is_a_unit() {
        let (header, windows) = units(b"\n>x", SCAN_CHUNK_LEN);
        assert!(header.is_empty());
        assert_eq!(texts(&windows), vec![">x"]);
    }

    #[test]
    fn test_windows_survive_chunk_boundaries() {
        let input = b">h\nACGTTGCA\nAC";
        let (_, expected) = units(input, SCAN_CHUNK_LEN);
        for chunk_len in 1..8 {
            let (header, windows) = units(input, chunk_len);
            assert_eq!(header, ">h");
            assert_eq!(windows, expected, "chunk length {chunk_len}");
        }
        assert_eq!(expected.len(), 9);
    }

    #[test]
    fn test_empty_and_single_unit_inputs() {
        assert!(units(b"", 16).1.is_empty());
        assert!(units(b"a\n", 16).1.is_empty());
        assert!(units(b">only header\n", 16).1.is_empty());
    }

    #[test]
    fn test_bytes_consumed_counts_everything() {
        let input = b">h\nAC\n";
        let mut scanner = SequenceScanner::with_chunk_len(&input[..], 2).unwrap();
        assert_eq!(scanner.bytes_consumed(), 3);
        while scanner.next_window().unwrap().is_some() {}
        assert_eq!(scanner.bytes_consumed(), input.len() as u64);
        assert_eq!(scanner.positions(), 1);
    }
}
