// src/types/mod.rs
pub mod job_posting;
pub mod snapshot;

pub use job_posting::{FeedKind, JobPosting};
pub use snapshot::{FeedCapture, SearchCapture, SearchHit};
