pub mod document;

pub use document::WorkItemDocument;
