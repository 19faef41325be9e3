//! Quartet Search - Web-Search Client
//!
//! Research enrichment for the architect stage:
//! - `SearchClient`: the search trait (dependency-injected)
//! - `BraveSearch`: Brave Web Search API client
//! - `MockSearch`: test double with call counting
//!
//! A search failure must always be catchable by the caller; research
//! absence is never fatal to a turn.

#![forbid(unsafe_code)]

pub mod brave;
pub mod client;
pub mod error;
pub mod mock;

pub use brave::{BraveConfig, BraveSearch};
pub use client::{SearchClient, SearchResult};
pub use error::{Error, Result};
pub use mock::MockSearch;
