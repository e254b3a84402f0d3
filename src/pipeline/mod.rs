pub mod labels;
pub mod resolve;
pub mod seed;
