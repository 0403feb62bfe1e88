//! Beadmap - recolor images with a bead palette
//!
//! HTTP service and CLI around the `lab_quantize` engine.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
