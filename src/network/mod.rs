//! Network layer - authenticated request execution against the collection API
//!
//! The pipeline talks to the network only through the [`Transport`] trait, so
//! stages can be exercised against in-memory fakes.

pub mod client;

pub use client::{append_query, ApiClient, QueryParam, RequestData, Transport};
