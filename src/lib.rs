/// Lessonsmith - Lesson Content Orchestration
///
/// Core library deciding which content providers serve a lesson request,
/// running them with fallback, adapting faith content to a chosen intensity
/// and denomination, and guiding a request through a six-step workflow.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
