//! Strategy Selection Engine
//!
//! Chooses which providers serve a content request:
//! - `registry`: provider ids, families, and the injected availability registry
//! - `grade`: grade label lookup and grade ordinals
//! - `analysis`: independent classifiers producing a [`ContentAnalysis`]
//! - `selector`: decision tables turning an analysis into an [`ApiStrategy`]
//!
//! Selection is a pure function of the request and the registry. There is no
//! randomness: ties that might otherwise be spread randomly are broken by a
//! stable hash of the request.

pub mod analysis;
pub mod grade;
mod registry;
mod selector;

pub use analysis::{ContentAnalysis, Rating, ResearchDepth, SubjectFamily};
pub use registry::{NeedAffinity, ProviderFamily, ProviderId, ProviderRegistry, UnknownProvider};
pub use selector::{ApiStrategy, Complexity, StrategyError, StrategySelector};
