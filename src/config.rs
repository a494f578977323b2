use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use serde_derive::Deserialize;
use thiserror::Error;

use chill::Timeouts;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Json,
}

impl Default for Format {
    fn default() -> Self {
        Format::Text
    }
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub url: Option<String>,
    pub encoding: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    /// Where to write the raw audio. `{uuid}` is replaced per run, `-` means
    /// stdout.
    pub stream_dump: Option<String>,
    pub format: Format,
    pub verbose: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[source] io::Error),

    #[error("parsing config: {0}")]
    Toml(#[source] toml::de::Error),
}

pub fn open(path: &Path) -> Result<Config, ConfigError> {
    let mut file = File::open(path).map_err(ConfigError::Io)?;
    let mut buff = String::new();
    file.read_to_string(&mut buff).map_err(ConfigError::Io)?;
    parse(&buff)
}

pub fn parse(text: &str) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(ConfigError::Toml)
}

impl Config {
    pub fn timeouts(&self) -> Timeouts {
        let mut timeouts = Timeouts::default();

        if let Some(secs) = self.connect_timeout_secs {
            timeouts.connect = Duration::from_secs(secs);
        }
        if let Some(secs) = self.read_timeout_secs {
            timeouts.read = Duration::from_secs(secs);
        }

        timeouts
    }

    pub fn stream_dump_path(&self, session: &str) -> Option<String> {
        self.stream_dump.as_ref().map(|template| template.replace("{uuid}", session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format, Format::Text);
        assert_eq!(config.timeouts(), Timeouts::default());
    }

    #[test]
    fn full_config() {
        let config = parse(r#"
            url = "http://radio.example/stream"
            encoding = "utf-8"
            connect_timeout_secs = 5
            read_timeout_secs = 60
            stream_dump = "/tmp/chill-{uuid}.mp3"
            format = "json"
            verbose = true
        "#).unwrap();

        assert_eq!(config.url.as_ref().map(String::as_str), Some("http://radio.example/stream"));
        assert_eq!(config.encoding.as_ref().map(String::as_str), Some("utf-8"));
        assert_eq!(config.format, Format::Json);
        assert!(config.verbose);
        assert_eq!(config.timeouts(), Timeouts {
            connect: Duration::from_secs(5),
            read: Duration::from_secs(60),
        });
        assert_eq!(config.stream_dump_path("abc").as_ref().map(String::as_str), Some("/tmp/chill-abc.mp3"));
    }

    #[test]
    fn bad_format_is_rejected() {
        match parse("format = \"xml\"") {
            Err(e @ ConfigError::Toml(_)) => assert!(e.to_string().starts_with("parsing config: ")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match open(Path::new("/nonexistent/chill.toml")) {
            Err(e @ ConfigError::Io(_)) => assert!(e.to_string().starts_with("reading config: ")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
