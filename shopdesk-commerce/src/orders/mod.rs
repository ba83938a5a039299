//! Order listing: day windows, candidate matrix, fetching and normalization.

pub mod candidates;
pub mod chunker;
pub mod fetcher;
pub mod parser;

pub use candidates::{FetchCandidate, OrderQuery, candidates_per_day, day_candidates};
pub use chunker::{ChunkedRange, DateRangeChunker};
pub use fetcher::{DayOutcome, OrderFetcher, RangeFetch};
pub use parser::{ResponseNormalizer, normalize_orders};
