//! Public API for the hatch-core crate.
//!
//! This module provides the [`Crosshatcher`] builder and the [`Progress`]
//! reporting hooks it drives.

mod builder;
mod progress;

pub use builder::{CrosshatchSettings, Crosshatcher, PreparedImage};
pub use progress::{report_stage, NoProgress, Progress, Stage};
