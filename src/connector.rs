use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{redirect, StatusCode};

use crate::endpoint::Endpoint;
use crate::error::ErrorKind;

pub const METADATA_REQUEST_HEADER: &str = "icy-metadata";
pub const METAINT_HEADER: &str = "icy-metaint";

const MAX_REDIRECTS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    /// Applies to every read on the open stream, so a stalled server
    /// fails the poll instead of hanging it.
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(30),
        }
    }
}

/// What the server tells us about itself in the response headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StationInfo {
    pub name: Option<String>,
    pub bitrate: Option<u32>,
    pub content_type: Option<String>,
}

impl StationInfo {
    fn from_headers(headers: &HeaderMap) -> StationInfo {
        let text = |name: &str| headers.get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        StationInfo {
            name: text("icy-name"),
            bitrate: text("icy-br").and_then(|br| br.parse().ok()),
            content_type: text(CONTENT_TYPE.as_str()),
        }
    }
}

/// An opened stream, positioned at the first audio byte.
pub struct IcyStream {
    pub body: Response,
    pub audio_frame_size: usize,
    pub station: StationInfo,
}

pub struct Connector {
    client: Client,
}

impl Connector {
    pub fn new(timeouts: Timeouts) -> Result<Connector, ErrorKind> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.read)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(ErrorKind::Connection)?;

        Ok(Connector { client: client })
    }

    pub fn open(&self, endpoint: &Endpoint) -> Result<IcyStream, ErrorKind> {
        let response = self.client
            .get(endpoint.url())
            .header(METADATA_REQUEST_HEADER, "1")
            .send()
            .map_err(ErrorKind::Connection)?;

        if response.status() != StatusCode::OK {
            return Err(ErrorKind::UnexpectedStatus(response.status()));
        }

        let audio_frame_size = audio_frame_size(response.headers())?;
        let station = StationInfo::from_headers(response.headers());

        Ok(IcyStream {
            body: response,
            audio_frame_size: audio_frame_size,
            station: station,
        })
    }
}

fn audio_frame_size(headers: &HeaderMap) -> Result<usize, ErrorKind> {
    let value = match headers.get(METAINT_HEADER) {
        Some(value) => value,
        None => return Err(ErrorKind::MissingMetadataHeader),
    };

    let malformed = || ErrorKind::MalformedHeader {
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    };

    let size = value.to_str()
        .map_err(|_| malformed())?
        .trim()
        .parse::<usize>()
        .map_err(|_| malformed())?;

    // a zero interval would never yield metadata
    if size == 0 {
        return Err(malformed());
    }

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(name, value) in pairs {
            map.insert(name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn parses_metaint() {
        assert_eq!(audio_frame_size(&headers(&[("icy-metaint", "16000")])).unwrap(), 16000);
        assert_eq!(audio_frame_size(&headers(&[("icy-metaint", " 8192 ")])).unwrap(), 8192);
    }

    #[test]
    fn missing_metaint() {
        match audio_frame_size(&headers(&[("icy-name", "Radio")])) {
            Err(ErrorKind::MissingMetadataHeader) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_metaint() {
        for &bad in &["abc", "-5", "1.5", "", "0"] {
            match audio_frame_size(&headers(&[("icy-metaint", bad)])) {
                Err(ErrorKind::MalformedHeader { value }) => assert_eq!(value, bad),
                other => panic!("unexpected {:?} for {:?}", other, bad),
            }
        }
    }

    #[test]
    fn station_info_from_headers() {
        let info = StationInfo::from_headers(&headers(&[
            ("icy-name", "Chill Radio"),
            ("icy-br", "128"),
            ("content-type", "audio/mpeg"),
        ]));

        assert_eq!(info, StationInfo {
            name: Some("Chill Radio".to_owned()),
            bitrate: Some(128),
            content_type: Some("audio/mpeg".to_owned()),
        });

        let info = StationInfo::from_headers(&headers(&[("icy-br", "lots")]));
        assert_eq!(info, StationInfo::default());
    }

    #[test]
    fn default_timeouts() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.connect, Duration::from_secs(10));
        assert_eq!(timeouts.read, Duration::from_secs(30));
    }
}
