//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. Currently a single
//! REST surface built on axum; services are injected through `AppState`.

pub mod rest;

pub use rest::*;
