use std::fmt;
use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Which part of a frame was being read when the stream failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Audio,
    BlockCount,
    Metadata,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Section::Audio => "audio",
            Section::BlockCount => "metadata length",
            Section::Metadata => "metadata",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("connecting: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("HTTP code {0}")]
    UnexpectedStatus(StatusCode),

    #[error("missing metadata header")]
    MissingMetadataHeader,

    #[error("malformed metadata header {value:?}")]
    MalformedHeader { value: String },

    #[error("reading {section} of frame {frame}: {source}")]
    StreamRead {
        section: Section,
        frame: u64,
        #[source]
        source: io::Error,
    },

    #[error("forwarding audio of frame {frame}: {source}")]
    SinkWrite {
        frame: u64,
        #[source]
        source: io::Error,
    },

    #[error("metadata is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("unknown metadata encoding {0:?}")]
    UnknownEncoding(String),
}

/// A failed poll, annotated with the stream it was polling.
#[derive(Debug, Error)]
#[error("polling {url}: {kind}")]
pub struct Error {
    url: String,
    #[source]
    kind: ErrorKind,
}

impl Error {
    pub fn new(url: &str, kind: ErrorKind) -> Self {
        Error {
            url: url.to_owned(),
            kind: kind,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}
