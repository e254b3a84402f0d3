pub mod client;
pub mod credentials;
pub mod session;
pub mod track;

pub use client::{PlayPublisher, PublishingApi};
pub use credentials::ServiceAccountKey;
pub use session::EditSession;
