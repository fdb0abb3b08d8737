use hnstat::query::{self, Query, QueryOptions};
use hnstat::report::TextReport;
use hnstat::{BoundedTopK, EventLog, FrequencyEntry, TimeRange};

fn main() -> hnstat::Result<()> {
    // A small log: one `timestamp<TAB>url` pair per line, malformed lines are skipped
    let log = EventLog::from_bytes(
        "1438387200\thttp://news.example/a\n\
         1438387201\thttp://news.example/b\n\
         1438387202\thttp://news.example/a\n\
         not-a-timestamp\thttp://news.example/c\n\
         1438387290\thttp://news.example/b\n\
         1438387291\thttp://news.example/b\n",
    );

    println!("Top URLs:");
    let mut report = TextReport::new(std::io::stdout());
    query::run(Query::Top { k: 2 }, &log, &QueryOptions::default(), &mut report)?;
    report.finish()?;

    println!("\nDistinct URLs before 1438387250:");
    let options = QueryOptions {
        range: TimeRange::new(None, Some(1438387250)),
        ..QueryOptions::default()
    };
    let mut report = TextReport::new(std::io::stdout());
    query::run(Query::Distinct, &log, &options, &mut report)?;
    report.finish()?;

    // The bounded container can also be used on its own
    let mut topk = BoundedTopK::new(3);
    for (key, count) in [("x", 1), ("y", 5), ("z", 3), ("w", 10), ("v", 0)] {
        topk.add(FrequencyEntry::new(key, count));
    }
    println!("\nBounded top-3:");
    for entry in &topk {
        println!("{}: {}", entry.key, entry.count);
    }

    Ok(())
}
