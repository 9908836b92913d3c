//! Crosshatch - pen-and-ink portrait renderer
//!
//! HTTP and CLI front end for the `hatch-core` pipeline: image decoding,
//! subject segmentation, texture loading and PNG encoding.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
