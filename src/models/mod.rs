//! Data models for the Promptify application.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod analysis;
mod idea;
mod prompt;

pub use analysis::*;
pub use idea::*;
pub use prompt::*;
