//! # routecheck
//!
//! Resolves the route URLs documented in a forked collection of a
//! collection-management API, so they can be cross-checked against what a
//! deployed service actually exposes.
//!
//! ## Pipeline
//! - Find the workspace by name
//! - Find the collection in it whose fork carries the configured label
//! - Fetch that collection's item tree
//! - Flatten the tree into URLs, children before their parent
//!
//! Every stage goes through the [`network::Transport`] trait and stops the
//! run at the first error.

pub mod config;
pub mod constants;
pub mod error;
pub mod flatten;
pub mod lookup;
pub mod models;
pub mod network;
pub mod pipeline;
pub mod report;
pub mod routes;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use flatten::flatten;
pub use lookup::find_first;
pub use models::{CollectionDetail, CollectionItem, CollectionSummary, Workspace};
pub use network::{ApiClient, QueryParam, RequestData, Transport};
pub use pipeline::{Pipeline, Resolution, Stage};
pub use routes::{diff_routes, load_routes, Route, RouteDiff};
