//! MOOC platform access
//!
//! - CourseFetcher: trait for fetching one course term
//! - MoocClient: reqwest implementation against the platform's private RPC API

pub mod client;

pub use client::{CourseFetcher, MoocClient, MoocClientConfig, fetch_all};
