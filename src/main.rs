mod config;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::thread;

use chrono::Local;
use clap::Parser;
use serde_derive::Serialize;
use uuid::Uuid;

use chill::log::Log;
use chill::metadata::split_artist;
use chill::{pipe, poll, Endpoint, PollOptions};

use config::{Config, Format};

// chunks of audio queued between the poll thread and the dump writer
const PIPE_CAPACITY: usize = 64;

#[derive(Serialize)]
struct NowPlaying<'a> {
    time: String,
    artist: Option<&'a str>,
    title: &'a str,
}

/// A little icecast metadata parser.
#[derive(Parser, Debug)]
#[command(name = "chill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// The stream to poll (overrides config file).
    url: Option<String>,
}

fn print_title(log: &Log, format: Format, to_stderr: bool, title: &str) {
    match format {
        Format::Text => log.info(title),
        Format::Json => {
            let (artist, song) = split_artist(title);
            let line = NowPlaying {
                time: Local::now().to_rfc3339(),
                artist: artist,
                title: song,
            };

            let json = match serde_json::to_string(&line) {
                Ok(json) => json,
                Err(e) => return log.error(&format!("serializing title {:?}: {}", title, e)),
            };

            if to_stderr {
                eprintln!("{}", json);
            } else {
                println!("{}", json);
            }
        }
    }
}

fn open_dump(path: &str) -> io::Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(File::create(path)?))
    }
}

/// Polls until the stream fails. `Err` means the poll could not be set up.
fn run(log: Log, config: Config, url: String) -> Result<chill::Error, String> {
    let mut endpoint = Endpoint::new(&url);
    if let Some(ref encoding) = config.encoding {
        endpoint = endpoint.with_encoding(encoding);
    }

    let format = config.format;
    let timeouts = config.timeouts();

    let session = Uuid::new_v4().to_string();
    let dump_path = match config.stream_dump_path(&session) {
        Some(path) => path,
        None => {
            let title_log = log.clone();
            let options = PollOptions::new()
                .with_timeouts(timeouts)
                .with_log(log)
                .with_title_callback(move |title| print_title(&title_log, format, false, title));

            return Ok(poll(&endpoint, options));
        }
    };

    let mut dump = open_dump(&dump_path)
        .map_err(|e| format!("Could not open stream dump {}: {}", dump_path, e))?;

    log.info(&format!("Dumping audio to {}", dump_path));

    let (writer, mut reader) = pipe(PIPE_CAPACITY);
    let to_stderr = dump_path == "-";

    let poll_log = log.clone();
    let poller = thread::spawn(move || {
        let title_log = poll_log.clone();
        let options = PollOptions::new()
            .with_timeouts(timeouts)
            .with_log(poll_log)
            .with_audio_sink(writer)
            .with_title_callback(move |title| print_title(&title_log, format, to_stderr, title));

        poll(&endpoint, options)
    });

    // returns once the poll thread drops its end of the pipe, or the dump
    // fails and we drop ours
    if let Err(e) = io::copy(&mut reader, &mut dump) {
        log.error(&format!("Writing stream dump {}: {}", dump_path, e));
    }
    drop(reader);

    poller.join().map_err(|_| "Poll thread panicked".to_owned())
}

fn main() {
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => match config::open(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("could not load config {}: {}", path.display(), e);
                process::exit(2);
            }
        },
        None => Config::default(),
    };

    let url = match args.url.or_else(|| config.url.clone()) {
        Some(url) => url,
        None => {
            eprintln!("no stream to poll: pass a url or set one in the config file");
            process::exit(2);
        }
    };

    let log = if config.verbose { Log::verbose() } else { Log::new() };

    match run(log.clone(), config, url) {
        Ok(err) => log.error(&format!("{}", err)),
        Err(msg) => log.error(&msg),
    }
    process::exit(1);
}
