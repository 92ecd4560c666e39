pub mod classify;
pub mod client;
pub mod generator;
pub mod redact;
