//! Cadence end-to-end test support
//!
//! - `harness`: drives a card through a sequence of reviews on a simulated clock
//! - `mocks`: card and parameter fixtures

pub mod mocks;
