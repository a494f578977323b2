use chrono::Local;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Info,
    Debug,
}

/// Line-oriented logger writing to stderr. Stdout is left alone so audio
/// can be piped out of the process.
#[derive(Clone, Debug)]
pub struct Log {
    max_level: Option<Level>,
}

impl Log {
    pub fn new() -> Self {
        Log { max_level: Some(Level::Info) }
    }

    pub fn verbose() -> Self {
        Log { max_level: Some(Level::Debug) }
    }

    pub fn silent() -> Self {
        Log { max_level: None }
    }

    pub fn enabled(&self, level: Level) -> bool {
        match self.max_level {
            Some(max) => level <= max,
            None => false,
        }
    }

    fn emit(&self, level: Level, msg: &str) {
        if !self.enabled(level) {
            return;
        }

        let label = match level {
            Level::Error => "ERROR",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        };

        eprintln!("{:5} [{}] {}", label, Local::now().format("%Y-%m-%d %H:%M:%S"), msg);
    }

    pub fn info(&self, msg: &str) {
        self.emit(Level::Info, msg);
    }

    pub fn error(&self, msg: &str) {
        self.emit(Level::Error, msg);
    }

    pub fn debug(&self, msg: &str) {
        self.emit(Level::Debug, msg);
    }
}

impl Default for Log {
    fn default() -> Self {
        Log::silent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_filtered() {
        let log = Log::new();
        assert!(log.enabled(Level::Error));
        assert!(log.enabled(Level::Info));
        assert!(!log.enabled(Level::Debug));

        assert!(Log::verbose().enabled(Level::Debug));
    }

    #[test]
    fn default_is_silent() {
        let log = Log::default();
        assert!(!log.enabled(Level::Error));
    }
}
