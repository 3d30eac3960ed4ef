//! Chain translation of a finished topstop stream.
//!
//! Symbols map one-to-one onto nucleotide letters, so chains can be viewed
//! with ordinary sequence tools:
//!
//! | topstop | `s` | `i` | `p` | `y` | `x` |
//! |---------|-----|-----|-----|-----|-----|
//! | chain   | `n` | `a` | `c` | `g` | `t` |

use std::io::{self, BufRead, BufReader, Read, Write};

use crate::constants::{CHAIN_CHUNK_LEN, HEADER_MARKER};
use crate::types::TopstopSymbol;

/// Chain letter for one topstop byte, `None` for bytes outside the alphabet.
#[must_use]
pub const fn chain_byte(byte: u8) -> Option<u8> {
    match TopstopSymbol::from_byte(byte) {
        Some(TopstopSymbol::S) => Some(b'n'),
        Some(TopstopSymbol::I) => Some(b'a'),
        Some(TopstopSymbol::P) => Some(b'c'),
        Some(TopstopSymbol::Y) => Some(b'g'),
        Some(TopstopSymbol::X) => Some(b't'),
        None => None,
    }
}

/// Streams a topstop file into its chain form in fixed-size chunks.
#[derive(Debug, Clone, Copy)]
pub struct ChainTranslator {
    chunk_len: usize,
}

impl Default for ChainTranslator {
    fn default() -> Self {
        Self {
            chunk_len: CHAIN_CHUNK_LEN,
        }
    }
}

impl ChainTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chunk_len(chunk_len: usize) -> Self {
        Self {
            chunk_len: chunk_len.max(1),
        }
    }

    /// Copies a leading header line when it is not blank, then translates
    /// the body. Returns the number of chain letters written.
    pub fn translate<R: Read, W: Write>(&self, source: R, sink: &mut W) -> io::Result<u64> {
        let mut reader = BufReader::with_capacity(self.chunk_len, source);

        if reader.fill_buf()?.first() == Some(&HEADER_MARKER) {
            let mut header = Vec::new();
            reader.read_until(b'\n', &mut header)?;
            while matches!(header.last(), Some(b'\n' | b'\r')) {
                header.pop();
            }
            if !header.iter().all(u8::is_ascii_whitespace) {
                sink.write_all(&header)?;
                sink.write_all(b"\n")?;
            }
        }

        let mut chunk = vec![0u8; self.chunk_len];
        let mut translated = Vec::with_capacity(self.chunk_len);
        let mut written = 0u64;
        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            translated.clear();
            translated.extend(chunk[..read].iter().filter_map(|&b| chain_byte(b)));
            sink.write_all(&translated)?;
            written += translated.len() as u64;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(input: &str) -> String {
        let mut out = Vec::new();
        ChainTranslator::with_chunk_len(3)
            .translate(input.as_bytes(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_symbol_alphabet() {
        assert_eq!(translate("ssiipyx"), "nnaacgt");
    }

    #[test]
    fn test_uppercase_input_gives_lowercase_chains() {
        assert_eq!(translate("SIPYX"), "nacgt");
    }

    #[test]
    fn test_header_copied_and_strays_dropped() {
        assert_eq!(translate(">seq 1\r\nii\nq s"), ">seq 1\naan");
    }

    #[test]
    fn test_marker_only_header_is_kept() {
        assert_eq!(translate(">\nxx"), ">\ntt");
        assert_eq!(translate("xx"), "tt");
    }

    #[test]
    fn test_count_of_written_letters() {
        let mut out = Vec::new();
        let written = ChainTranslator::new()
            .translate(">h\nsipyx".as_bytes(), &mut out)
            .unwrap();
        assert_eq!(written, 5);
    }
}
