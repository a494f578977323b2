//! Now-playing metadata from Icecast/Shoutcast streams.
//!
//! ```no_run
//! use chill::{poll, Endpoint, PollOptions};
//!
//! let endpoint = Endpoint::new("http://radio.example/stream");
//! let err = poll(&endpoint, PollOptions::new().with_title_callback(|title| {
//!     println!("{}", title);
//! }));
//! eprintln!("{}", err);
//! ```

pub mod connector;
pub mod demux;
pub mod endpoint;
pub mod error;
pub mod log;
pub mod metadata;
pub mod options;
pub mod pipe;
pub mod poll;

pub use connector::{StationInfo, Timeouts};
pub use endpoint::Endpoint;
pub use error::{Error, ErrorKind};
pub use metadata::Codepage;
pub use options::PollOptions;
pub use pipe::pipe;
pub use poll::poll;
