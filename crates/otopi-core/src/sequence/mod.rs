//! The Sequence Builder (§4.F) and Runner (§4.G): turning registered
//! handlers into an ordered execution plan and then driving it.
pub mod builder;
pub mod error;
pub mod runner;
#[cfg(test)]
mod tests;

pub use builder::{build, Sequence};
pub use error::SequenceError;
pub use runner::run;
