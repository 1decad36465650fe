//! Invoice model, triage rules, rule engine, and batch summary.
//!
//! Everything here is pure in-memory computation; reading and writing
//! files lives in [`crate::io`].

mod builder;
mod engine;
mod error;
pub mod rules;
mod summary;
mod types;

pub use builder::*;
pub use engine::*;
pub use error::*;
pub use summary::*;
pub use types::*;
