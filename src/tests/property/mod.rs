//! Property-based tests for Lessonsmith
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! Run all property tests:
//! ```sh
//! cargo test property --release
//! ```
//!
//! Run a specific property test module:
//! ```sh
//! cargo test property::strategy_props --release
//! ```
//!
//! ## Test Modules
//!
//! - `strategy_props`: Tests for strategy selection
//!   - Primary never appears among the backups
//!   - Backups contain no duplicates
//!   - Every chosen provider is available and in its family
//!   - Same request yields the same strategy
//!
//! - `adaptation_props`: Tests for content adaptation
//!   - Applying an exclude-only adaptation twice equals applying it once
//!   - Level 0 output contains no faith terms
//!   - Level 3 yields one explicit-doctrine rule per profile emphasis
//!   - Unknown profile keys resolve to the neutral profile
//!
//! - `workflow_props`: Tests for the workflow state machine
//!   - A step is complete iff its stored data validates
//!   - A request can be built iff all six steps are complete
//!   - Navigation succeeds iff the step number is 1-6
//!   - Transitions never modify the original state
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod adaptation_props;
mod strategy_props;
mod workflow_props;
