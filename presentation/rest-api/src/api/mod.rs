pub mod error;
pub mod extraction;
pub mod health;
pub mod tags;
