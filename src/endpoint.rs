use crate::error::ErrorKind;
use crate::metadata::Codepage;

/// A stream to poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    /// Charset of the metadata, ISO-8859-1 when not given.
    encoding: Option<String>,
}

impl Endpoint {
    pub fn new(url: &str) -> Endpoint {
        Endpoint {
            url: url.to_owned(),
            encoding: None,
        }
    }

    pub fn with_encoding(mut self, encoding: &str) -> Endpoint {
        self.encoding = Some(encoding.to_owned());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_ref().map(String::as_str)
    }

    pub fn codepage(&self) -> Result<Codepage, ErrorKind> {
        match self.encoding() {
            None => Ok(Codepage::default()),
            Some(label) => Codepage::from_label(label)
                .ok_or_else(|| ErrorKind::UnknownEncoding(label.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_latin1() {
        let endpoint = Endpoint::new("http://radio.example/stream");
        assert_eq!(endpoint.encoding(), None);
        assert_eq!(endpoint.codepage().unwrap(), Codepage::Latin1);
    }

    #[test]
    fn honors_encoding() {
        let endpoint = Endpoint::new("http://radio.example/stream").with_encoding("utf-8");
        assert_eq!(endpoint.encoding(), Some("utf-8"));
        assert_eq!(endpoint.codepage().unwrap(), Codepage::Utf8);
    }

    #[test]
    fn rejects_unknown_encoding() {
        let endpoint = Endpoint::new("http://radio.example/stream").with_encoding("ebcdic");
        match endpoint.codepage() {
            Err(ErrorKind::UnknownEncoding(label)) => assert_eq!(label, "ebcdic"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
