pub mod client;
pub mod issue;
pub mod label;

pub use client::{GitHubClient, IssueTracker};
