//! Bounded in-memory pipe for handing audio from the poll thread to a
//! consumer thread. Writes block once `capacity` chunks are queued.

use std::io::{self, Read, Write};
use std::sync::mpsc;

pub struct PipeWriter {
    tx: mpsc::SyncSender<Vec<u8>>,
}

pub struct PipeReader {
    rx: mpsc::Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
}

pub fn pipe(capacity: usize) -> (PipeWriter, PipeReader) {
    let (tx, rx) = mpsc::sync_channel(capacity);

    let writer = PipeWriter { tx: tx };
    let reader = PipeReader {
        rx: rx,
        chunk: Vec::new(),
        pos: 0,
    };

    (writer, reader)
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        match self.tx.send(buf.to_vec()) {
            Ok(()) => Ok(buf.len()),
            Err(_) => Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe reader dropped")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.pos >= self.chunk.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                // writer gone, no more audio
                Err(_) => return Ok(0),
            }
        }

        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;

        Ok(n)
    }
}
