pub mod endpoint;
pub mod range;
