//! Content Adaptation Engine
//!
//! Turns an intensity level (0-3) and a content profile into concrete
//! transformation rules, text filters and prompt augmentations, applies those
//! filters to generated text, and checks generated text against the chosen
//! level and profile.
//!
//! # Module Structure
//!
//! - `types`: `IntensityLevel`, `Adaptation`, rules, filters and reports
//! - `keywords`: term patterns and subject contexts used by the engine
//! - `engine`: `AdaptationEngine`

mod engine;
pub mod keywords;
mod types;

pub use engine::{apply_adaptation, AdaptationEngine};
pub use types::*;
