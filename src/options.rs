use std::fmt;
use std::io::Write;

use crate::connector::Timeouts;
use crate::log::Log;

pub type TitleCallback<'a> = Box<dyn FnMut(&str) + 'a>;
pub type AudioSink<'a> = Box<dyn Write + 'a>;

/// Options for one call to `poll`. Without a sink audio is discarded,
/// without a callback titles are dropped.
#[derive(Default)]
pub struct PollOptions<'a> {
    pub(crate) title_callback: Option<TitleCallback<'a>>,
    pub(crate) audio_sink: Option<AudioSink<'a>>,
    pub(crate) timeouts: Timeouts,
    pub(crate) log: Log,
}

impl<'a> PollOptions<'a> {
    pub fn new() -> PollOptions<'a> {
        PollOptions::default()
    }

    pub fn with_title_callback<F>(mut self, callback: F) -> PollOptions<'a>
        where F: FnMut(&str) + 'a
    {
        self.title_callback = Some(Box::new(callback));
        self
    }

    pub fn with_audio_sink<W>(mut self, sink: W) -> PollOptions<'a>
        where W: Write + 'a
    {
        self.audio_sink = Some(Box::new(sink));
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> PollOptions<'a> {
        self.timeouts = timeouts;
        self
    }

    pub fn with_log(mut self, log: Log) -> PollOptions<'a> {
        self.log = log;
        self
    }
}

impl<'a> fmt::Debug for PollOptions<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PollOptions")
            .field("title_callback", &self.title_callback.is_some())
            .field("audio_sink", &self.audio_sink.is_some())
            .field("timeouts", &self.timeouts)
            .field("log", &self.log)
            .finish()
    }
}

/// Hands titles to the caller's callback, one call per title, in order.
pub(crate) struct Dispatcher<'a> {
    callback: Option<TitleCallback<'a>>,
    dispatched: u64,
}

impl<'a> Dispatcher<'a> {
    pub fn new(callback: Option<TitleCallback<'a>>) -> Dispatcher<'a> {
        Dispatcher {
            callback: callback,
            dispatched: 0,
        }
    }

    pub fn dispatch(&mut self, title: &str) {
        if let Some(ref mut callback) = self.callback {
            callback(title);
        }
        self.dispatched += 1;
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}
