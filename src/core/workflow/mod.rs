//! Content Workflow State Machine
//!
//! Walks an educator through configuring one piece of content in six steps:
//! 1. Basic Info - grade, subject, estimated time
//! 2. Topic - topic and learning objectives
//! 3. Faith Integration - intensity level and denomination
//! 4. Customization - difficulty, style, problem count
//! 5. Template - layout choice
//! 6. Final Review - title and notes
//!
//! # Design Principles
//!
//! - **Immutable**: every transition returns a new [`WorkflowState`]
//! - **Independent**: each step validates only its own data
//! - **Non-linear**: any step may be visited and edited in any order
//! - **Gated**: a [`GenerationRequest`] exists only once all six steps validate

mod state;
mod types;
pub mod validation;

pub use state::*;
pub use types::*;
