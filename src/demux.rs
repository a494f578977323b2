//! Splits an ICY body into audio and metadata.
//!
//! The body repeats `[audio_frame_size bytes of audio][1 byte block count]
//! [block count * 16 bytes of metadata]` until the connection ends.

use std::io::{self, BufReader, Read, Write};

use crate::error::{ErrorKind, Section};

pub const METADATA_BLOCK_SIZE: usize = 16;

const CHUNK_SIZE: usize = 4096;

pub struct Demuxer<R> {
    stream: BufReader<R>,
    audio_frame_size: usize,
    metadata: Vec<u8>,
    frames: u64,
    audio_bytes: u64,
}

impl<R: Read> Demuxer<R> {
    pub fn new(stream: R, audio_frame_size: usize) -> Demuxer<R> {
        Demuxer {
            stream: BufReader::new(stream),
            audio_frame_size: audio_frame_size,
            metadata: Vec::with_capacity(255 * METADATA_BLOCK_SIZE),
            frames: 0,
            audio_bytes: 0,
        }
    }

    /// Number of complete frames read so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn audio_bytes(&self) -> u64 {
        self.audio_bytes
    }

    /// Copies one audio frame into `sink`, chunk by chunk as it arrives.
    pub fn forward_audio<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<(), ErrorKind> {
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut remaining = self.audio_frame_size;

        while remaining > 0 {
            let want = remaining.min(chunk.len());

            let n = match self.stream.read(&mut chunk[..want]) {
                Ok(0) => return Err(self.read_error(Section::Audio, unexpected_eof())),
                Ok(n) => n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.read_error(Section::Audio, e)),
            };

            if let Err(e) = sink.write_all(&chunk[..n]) {
                return Err(ErrorKind::SinkWrite {
                    frame: self.frames + 1,
                    source: e,
                });
            }

            remaining -= n;
            self.audio_bytes += n as u64;
        }

        Ok(())
    }

    /// Reads the block count byte and the metadata it announces. An empty
    /// slice means the server had nothing to say this frame.
    pub fn read_metadata(&mut self) -> Result<&[u8], ErrorKind> {
        let mut block_count = [0u8; 1];
        if let Err(e) = self.stream.read_exact(&mut block_count) {
            return Err(self.read_error(Section::BlockCount, e));
        }

        let size = block_count[0] as usize * METADATA_BLOCK_SIZE;

        self.metadata.clear();
        self.metadata.resize(size, 0);
        if let Err(e) = self.stream.read_exact(&mut self.metadata) {
            return Err(self.read_error(Section::Metadata, e));
        }

        Ok(&self.metadata)
    }

    /// Alternates between audio and metadata until the stream fails, which
    /// is the only way this returns.
    pub fn run<W, F>(&mut self, sink: &mut W, mut on_metadata_frame: F) -> ErrorKind
        where W: Write + ?Sized,
              F: FnMut(&[u8]) -> Result<(), ErrorKind>
    {
        loop {
            if let Err(e) = self.forward_audio(sink) {
                return e;
            }

            let result = match self.read_metadata() {
                Ok(metadata) => on_metadata_frame(metadata),
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                return e;
            }

            self.frames += 1;
        }
    }

    fn read_error(&self, section: Section, source: io::Error) -> ErrorKind {
        ErrorKind::StreamRead {
            section: section,
            frame: self.frames + 1,
            source: source,
        }
    }
}

fn unexpected_eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "stream ended in the middle of a frame")
}
