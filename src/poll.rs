use std::convert::Infallible;
use std::io;
use std::time::Instant;

use uuid::Uuid;

use crate::connector::{Connector, IcyStream, StationInfo};
use crate::demux::Demuxer;
use crate::endpoint::Endpoint;
use crate::error::{Error, ErrorKind};
use crate::metadata::Metadata;
use crate::options::{AudioSink, Dispatcher, PollOptions};

/// Connects to `endpoint` and reads it until something goes wrong.
///
/// Audio goes to the configured sink and every title the station announces
/// goes to the title callback, both on the calling thread and in stream
/// order. There is no success case: the returned error says why the poll
/// stopped. Run this on its own thread to do other work meanwhile, and call
/// it again to reconnect.
pub fn poll(endpoint: &Endpoint, options: PollOptions) -> Error {
    let kind = match run(endpoint, options) {
        Ok(never) => match never {},
        Err(kind) => kind,
    };

    Error::new(endpoint.url(), kind)
}

fn run(endpoint: &Endpoint, options: PollOptions) -> Result<Infallible, ErrorKind> {
    let PollOptions { title_callback, audio_sink, timeouts, log } = options;

    let codepage = endpoint.codepage()?;
    let connector = Connector::new(timeouts)?;
    let IcyStream { body, audio_frame_size, station } = connector.open(endpoint)?;

    let session = Uuid::new_v4();

    log.info(&format!("Started stream {} on {} ({})",
        session,
        endpoint.url(),
        describe(&station, audio_frame_size)));

    let mut sink: AudioSink = match audio_sink {
        Some(sink) => sink,
        None => Box::new(io::sink()),
    };

    let mut dispatcher = Dispatcher::new(title_callback);
    let mut demux = Demuxer::new(body, audio_frame_size);
    let start = Instant::now();

    let err = demux.run(&mut *sink, |raw| {
        let metadata = Metadata::decode(raw, codepage)?;

        for title in metadata.titles() {
            log.debug(&format!("Now playing on {}: {}", session, title));
            dispatcher.dispatch(title);
        }

        Ok(())
    });

    log.info(&format!("Finished stream {} on {} after {} frames, {} audio bytes and {} titles (duration {} sec): {}",
        session,
        endpoint.url(),
        demux.frames(),
        demux.audio_bytes(),
        dispatcher.dispatched(),
        start.elapsed().as_secs(),
        err));

    Err(err)
}

fn describe(station: &StationInfo, audio_frame_size: usize) -> String {
    let mut parts = Vec::new();

    if let Some(ref name) = station.name {
        parts.push(format!("{:?}", name));
    }
    if let Some(ref content_type) = station.content_type {
        parts.push(content_type.clone());
    }
    if let Some(bitrate) = station.bitrate {
        parts.push(format!("{}kbps", bitrate));
    }
    parts.push(format!("metadata every {} bytes", audio_frame_size));

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_station() {
        let station = StationInfo {
            name: Some("Chill Radio".to_owned()),
            bitrate: Some(128),
            content_type: Some("audio/mpeg".to_owned()),
        };

        assert_eq!(describe(&station, 16000),
            "\"Chill Radio\" audio/mpeg 128kbps metadata every 16000 bytes");
        assert_eq!(describe(&StationInfo::default(), 8), "metadata every 8 bytes");
    }

    #[test]
    fn unknown_encoding_fails_before_connecting() {
        // nothing listens on port 9, the encoding check must come first
        let endpoint = Endpoint::new("http://127.0.0.1:9/stream").with_encoding("klingon");
        let err = poll(&endpoint, PollOptions::new());

        assert_eq!(err.url(), "http://127.0.0.1:9/stream");
        match *err.kind() {
            ErrorKind::UnknownEncoding(ref label) => assert_eq!(label, "klingon"),
            ref other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_url_is_a_connection_error() {
        let endpoint = Endpoint::new("not a url");
        let err = poll(&endpoint, PollOptions::new());

        match *err.kind() {
            ErrorKind::Connection(_) => (),
            ref other => panic!("unexpected {:?}", other),
        }
    }
}
