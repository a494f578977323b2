//! Decoding of ICY metadata frames.
//!
//! A frame looks like `StreamTitle='Artist - Song';StreamUrl='';` padded
//! with NUL bytes up to the next 16-byte boundary.

use crate::error::ErrorKind;

pub const TITLE_KEY: &str = "StreamTitle";

/// Character set of the metadata text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codepage {
    Latin1,
    Utf8,
}

impl Codepage {
    pub fn from_label(label: &str) -> Option<Codepage> {
        match label.trim().to_ascii_lowercase().as_str() {
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "l1" => Some(Codepage::Latin1),
            "utf-8" | "utf8" => Some(Codepage::Utf8),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Codepage::Latin1 => "ISO-8859-1",
            Codepage::Utf8 => "UTF-8",
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String, ErrorKind> {
        match *self {
            // every byte maps to the code point of the same value
            Codepage::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Codepage::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|_| ErrorKind::Decode { encoding: self.name() }),
        }
    }
}

impl Default for Codepage {
    fn default() -> Self {
        Codepage::Latin1
    }
}

/// Decoded text of one metadata frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    text: String,
}

impl Metadata {
    pub fn decode(raw: &[u8], codepage: Codepage) -> Result<Self, ErrorKind> {
        let end = raw.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
        let text = codepage.decode(&raw[..end])?;
        Ok(Metadata { text: text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pairs(&self) -> Pairs<'_> {
        Pairs(&self.text)
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.pairs()
            .find(|&(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Every `StreamTitle` in the frame that is not a placeholder, unquoted.
    pub fn titles<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs()
            .filter(|&(key, _)| key == TITLE_KEY)
            .map(|(_, value)| unquote(value))
            .filter(|title| !is_placeholder(title))
    }
}

/// Decodes a raw frame into its `key=value` pairs.
pub fn decode(raw: &[u8], codepage: Codepage) -> Result<Vec<(String, String)>, ErrorKind> {
    let metadata = Metadata::decode(raw, codepage)?;

    Ok(metadata.pairs()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect())
}

/// Iterator over the `key=value` segments of a metadata text. Empty segments
/// and segments without `=` are skipped.
pub struct Pairs<'a>(&'a str);

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.0.is_empty() {
            let mut iter = self.0.splitn(2, ';');
            let segment = iter.next().unwrap_or("");
            self.0 = iter.next().unwrap_or("");

            let mut kv = segment.splitn(2, '=');
            if let (Some(k), Some(v)) = (kv.next(), kv.next()) {
                return Some((k, v));
            }
        }

        None
    }
}

/// `'foo'` becomes `foo`, `foo` stays `foo`.
pub fn unquote(value: &str) -> &str {
    if value.starts_with('\'') {
        let value = value.strip_suffix('\'').unwrap_or(value);
        value.strip_prefix('\'').unwrap_or(value)
    } else {
        value
    }
}

/// Stations send things like ` - ` when nothing is playing.
pub fn is_placeholder(title: &str) -> bool {
    title.trim_matches(|c| c == ' ' || c == '-').is_empty()
}

/// Splits `Artist - Song` on the first separator.
pub fn split_artist(title: &str) -> (Option<&str>, &str) {
    let mut iter = title.splitn(2, " - ");
    match (iter.next(), iter.next()) {
        (Some(artist), Some(song)) if !artist.trim().is_empty() => (Some(artist.trim()), song.trim()),
        _ => (None, title.trim()),
    }
}
