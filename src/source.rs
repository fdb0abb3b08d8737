use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{Error, Result};
use crate::event::{parse_line, Event, TimeRange};

/// Path naming standard input instead of a file.
pub const STDIN_PATH: &str = "-";

enum Input {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl Deref for Input {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Input::Mapped(mmap) => &mmap[..],
            Input::Buffered(bytes) => &bytes[..],
        }
    }
}

/// Raw bytes of a tab-separated `(timestamp, key)` log.
pub struct EventLog {
    input: Input,
}

impl EventLog {
    /// Opens `path`, memory-mapping regular files. `-` reads stdin to the end.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_stdin(path, || io::stdin().lock())
    }

    /// Like [`EventLog::open`], reading `-` from the reader returned by `stdin`.
    pub fn open_with_stdin<P, R, F>(path: P, stdin: F) -> Result<Self>
    where
        P: AsRef<Path>,
        R: Read,
        F: FnOnce() -> R,
    {
        let path = path.as_ref();
        if path == Path::new(STDIN_PATH) {
            return Self::from_reader(stdin()).map_err(|source| Error::Input {
                path: PathBuf::from(STDIN_PATH),
                source,
            });
        }

        Self::map_file(path).map_err(|source| Error::Input {
            path: path.to_path_buf(),
            source,
        })
    }

    fn map_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self::from_bytes(Vec::new()));
        }
        // SAFETY: the input file is assumed not to be truncated or modified while it
        // is scanned; a concurrent writer can make reads through the mapping fault.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            input: Input::Mapped(mmap),
        })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            input: Input::Buffered(bytes.into()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.input
    }

    /// Lazily yields the well-formed events that fall inside `range`, in file order.
    pub fn events(&self, range: TimeRange) -> Events<'_> {
        Events {
            rest: &self.input,
            range,
            stats: ScanStats::default(),
        }
    }
}

/// Line counters collected while scanning an [`EventLog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines: usize,
    pub malformed: usize,
    pub out_of_range: usize,
}

impl ScanStats {
    /// Lines that were handed on to the aggregator.
    pub fn accepted(&self) -> usize {
        self.lines - self.malformed - self.out_of_range
    }
}

pub struct Events<'a> {
    rest: &'a [u8],
    range: TimeRange,
    stats: ScanStats,
}

impl<'a> Events<'a> {
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    fn next_line(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest;
        if rest.is_empty() {
            return None;
        }
        match rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                self.rest = &rest[end + 1..];
                Some(&rest[..end])
            }
            None => {
                self.rest = &[];
                Some(rest)
            }
        }
    }
}

impl<'a> Iterator for Events<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        while let Some(line) = self.next_line() {
            self.stats.lines += 1;
            let Some(event) = parse_line(line) else {
                self.stats.malformed += 1;
                log::trace!(
                    "skipping malformed line {}: {:?}",
                    self.stats.lines,
                    String::from_utf8_lossy(line)
                );
                continue;
            };
            if !self.range.contains(event.timestamp) {
                self.stats.out_of_range += 1;
                continue;
            }
            return Some(event);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(log: &EventLog, range: TimeRange) -> Vec<&str> {
        log.events(range).map(|event| event.key).collect()
    }

    #[test]
    fn test_events_in_file_order() {
        let log = EventLog::from_bytes("1\ta\n2\tb\n3\tc\n");
        assert_eq!(keys(&log, TimeRange::all()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let log = EventLog::from_bytes("1\ta\r\n2\tb");
        assert_eq!(keys(&log, TimeRange::all()), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        let log = EventLog::from_bytes(Vec::new());
        let mut events = log.events(TimeRange::all());
        assert_eq!(events.next(), None);
        assert_eq!(events.stats(), ScanStats::default());
    }

    #[test]
    fn test_range_filter_excludes_outside_records() {
        let log = EventLog::from_bytes("5\tearly\n15\tinside\n25\tlate\n");
        assert_eq!(keys(&log, TimeRange::new(Some(10), Some(20))), vec!["inside"]);
    }

    #[test]
    fn test_stats_count_skipped_lines() {
        let log = EventLog::from_bytes("5\ta\nbogus\n\n0\tb\n15\tc\n25\td\n");
        let mut events = log.events(TimeRange::new(Some(10), Some(20)));
        let collected: Vec<_> = events.by_ref().collect();
        assert_eq!(collected, vec![Event { timestamp: 15, key: "c" }]);

        let stats = events.stats();
        assert_eq!(stats.lines, 6);
        assert_eq!(stats.malformed, 3);
        assert_eq!(stats.out_of_range, 2);
        assert_eq!(stats.accepted(), 1);
    }

    #[test]
    fn test_from_reader() {
        let log = EventLog::from_reader(&b"7\tx\n"[..]).unwrap();
        assert_eq!(log.as_bytes(), b"7\tx\n");
        assert_eq!(keys(&log, TimeRange::all()), vec!["x"]);
    }

    #[test]
    fn test_dash_reads_stdin() {
        let log = EventLog::open_with_stdin(STDIN_PATH, || &b"3\tpiped\n4\tpiped\n"[..]).unwrap();
        assert_eq!(keys(&log, TimeRange::all()), vec!["piped", "piped"]);
    }

    #[test]
    fn test_stdin_only_read_for_dash() {
        let err = EventLog::open_with_stdin("/definitely/not/here.tsv", || -> &'static [u8] {
            panic!("stdin must not be touched for a file path")
        })
        .err()
        .unwrap();
        assert!(matches!(err, Error::Input { .. }));
    }

    #[test]
    fn test_stdin_read_error_names_dash() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "broken pipe"))
            }
        }

        let err = EventLog::open_with_stdin(STDIN_PATH, || Broken).err().unwrap();
        match err {
            Error::Input { path, .. } => assert_eq!(path, PathBuf::from(STDIN_PATH)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_open_missing_file() {
        let err = EventLog::open("/definitely/not/here.tsv").err().unwrap();
        assert!(matches!(err, Error::Input { .. }));
        assert!(err.to_string().contains("/definitely/not/here.tsv"));
    }
}
