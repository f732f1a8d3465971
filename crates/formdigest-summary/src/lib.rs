//! Fixed-template narrative summary over an extracted record's
//! `structured_data`. No defaulting: every required key must be present.

mod error;
mod summary;

pub use error::SummaryError;
pub use summary::{summarize, summarize_file};
