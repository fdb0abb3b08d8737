use crate::error::Result;
use crate::event::TimeRange;
use crate::frequency::FrequencyMap;
use crate::report::ReportSink;
use crate::selector::{TopKSelector, DEFAULT_THRESHOLD};
use crate::source::{EventLog, ScanStats};

/// An aggregate question asked of an event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Number of distinct keys.
    Distinct,
    /// The `k` most frequent keys, most frequent first.
    Top { k: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub range: TimeRange,
    /// Largest `k` answered with the bounded selector instead of a full sort.
    pub threshold: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            range: TimeRange::all(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// What a query run did, for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOutcome {
    pub scan: ScanStats,
    pub distinct: usize,
    /// Rows handed to the sink: 1 for a distinct query, the top-k length otherwise.
    pub reported: usize,
}

/// Counts the keys of every well-formed event of `input` inside `range`.
pub fn count_entries(input: &EventLog, range: TimeRange) -> (FrequencyMap, ScanStats) {
    let mut events = input.events(range);
    let map: FrequencyMap = events.by_ref().collect();
    (map, events.stats())
}

pub fn run<S>(
    query: Query,
    input: &EventLog,
    options: &QueryOptions,
    sink: &mut S,
) -> Result<QueryOutcome>
where
    S: ReportSink + ?Sized,
{
    let (map, scan) = count_entries(input, options.range);
    log::debug!(
        "scanned {} lines: {} accepted, {} malformed, {} out of range",
        scan.lines,
        scan.accepted(),
        scan.malformed,
        scan.out_of_range
    );

    let distinct = map.len();
    let reported = match query {
        Query::Distinct => {
            sink.distinct(distinct)?;
            1
        }
        Query::Top { k } => {
            let top = TopKSelector::new(options.threshold).select(map, k);
            for entry in &top {
                sink.entry(&entry.key, entry.count)?;
            }
            top.len()
        }
    };

    Ok(QueryOutcome {
        scan,
        distinct,
        reported,
    })
}
