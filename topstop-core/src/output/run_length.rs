use std::io::{self, Write};

const FILL_LEN: usize = 4096;

/// Writes runs of repeated bytes without materializing them.
#[derive(Debug)]
pub struct RunLengthWriter<W: Write> {
    inner: W,
    fill: [u8; FILL_LEN],
    fill_byte: Option<u8>,
    written: u64,
}

impl<W: Write> RunLengthWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            fill: [0; FILL_LEN],
            fill_byte: None,
            written: 0,
        }
    }

    /// Writes `byte` once.
    pub fn push(&mut self, byte: u8) -> io::Result<()> {
        self.inner.write_all(&[byte])?;
        self.written += 1;
        Ok(())
    }

    /// Writes `byte` `count` times.
    pub fn push_run(&mut self, byte: u8, count: u64) -> io::Result<()> {
        if count == 1 {
            return self.push(byte);
        }
        if self.fill_byte != Some(byte) {
            self.fill = [byte; FILL_LEN];
            self.fill_byte = Some(byte);
        }
        let mut remaining = count;
        while remaining > 0 {
            let step = remaining.min(FILL_LEN as u64) as usize;
            self.inner.write_all(&self.fill[..step])?;
            remaining -= step as u64;
        }
        self.written += count;
        Ok(())
    }

    /// Bytes written through [`push`](Self::push) and [`push_run`](Self::push_run).
    #[must_use]
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Mutable access to the sink, for writing a header ahead of the runs.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Flushes and returns the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_expand() {
        let mut writer = RunLengthWriter::new(Vec::new());
        writer.push_run(b's', 3).unwrap();
        writer.push(b'i').unwrap();
        writer.push_run(b'y', 0).unwrap();
        writer.push_run(b'x', 2).unwrap();
        assert_eq!(writer.written(), 6);
        assert_eq!(writer.finish().unwrap(), b"sssixx");
    }

    #[test]
    fn test_run_longer_than_fill_buffer() {
        let mut writer = RunLengthWriter::new(Vec::new());
        writer.push_run(b's', 10_000).unwrap();
        writer.push_run(b'i', 5).unwrap();
        let out = writer.finish().unwrap();
        assert_eq!(out.len(), 10_005);
        assert!(out[..10_000].iter().all(|&b| b == b's'));
        assert_eq!(&out[10_000..], b"iiiii");
    }
}
