pub mod interface;
pub mod client;
pub mod aggregator;

pub use interface::{SignCandidate, SignEntry, SignLookupRequest, SignLookupResponse, SignVideoSource};
pub use client::HttpSignSource;
pub use aggregator::{lookup_all, tokenize};
