//! Substrate Block Explorer
//!
//! A terminal client for a chain indexing API: paginated event lists and
//! detail views for blocks, accounts, calls, events and extrinsics.
pub mod api;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod query;
pub mod render;
pub mod route;
pub mod views;
