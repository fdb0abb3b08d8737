use std::io::{self, BufWriter, Write};

/// Destination for query results.
#[cfg_attr(test, mockall::automock)]
pub trait ReportSink {
    /// One top-k row; called in descending count order.
    fn entry(&mut self, key: &str, count: u64) -> io::Result<()>;

    /// The distinct-key count.
    fn distinct(&mut self, count: usize) -> io::Result<()>;
}

/// Plain-text report: `<key> <count>` per row, the distinct count alone on a line.
pub struct TextReport<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    /// Flushes buffered output and returns the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        self.out.into_inner().map_err(|err| err.into_error())
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn entry(&mut self, key: &str, count: u64) -> io::Result<()> {
        writeln!(self.out, "{} {}", key, count)
    }

    fn distinct(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "{}", count)
    }
}
