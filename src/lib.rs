//! Distinct-count and top-K queries over tab-separated `(timestamp, URL)` event logs.
//!
//! Events are counted into an exact [`FrequencyMap`]; the top-K rows are then
//! extracted either with a fixed-capacity sorted container ([`BoundedTopK`]),
//! which rejects most entries in O(1) once it is full, or with a full sort
//! when K is large. [`TopKSelector`] picks between the two.
//!
//! ```
//! use hnstat::{FrequencyMap, TopKSelector};
//!
//! let map = FrequencyMap::aggregate([(1, "a"), (2, "b"), (3, "a"), (4, "c"), (5, "b"), (6, "b")]);
//! let top = TopKSelector::default().select(map, 2);
//!
//! assert_eq!(top[0].key, "b");
//! assert_eq!(top[0].count, 3);
//! assert_eq!(top[1].key, "a");
//! ```

mod bounded;
pub use bounded::BoundedTopK;

mod error;
pub use error::{Error, Result};

pub mod event;
pub use event::{Event, TimeRange};

mod frequency;
pub use frequency::{FrequencyEntry, FrequencyMap};

pub mod query;
pub use query::{Query, QueryOptions, QueryOutcome};

pub mod report;

mod selector;
pub use selector::{select_with, Strategy, TopKSelector, DEFAULT_THRESHOLD};

pub mod source;
pub use source::EventLog;
