//! glica-bedrock
//!
//! The reasoning collaborator: Bedrock model invocation, prompt assembly,
//! and structured output parsing for the three report operations.

pub mod client;
pub mod error;
pub mod generate;
pub mod prompt;
