//! Crushview - live color-quantization preview core.
//!
//! The recompute coordinator behind an interactive image-preview tool:
//! it decides when to regenerate the preview, keeps at most one
//! regeneration in flight, and collapses bursts of user input into a
//! single follow-up run carrying the freshest state.

pub mod error;
pub mod models;
pub mod services;
