//! footprint-gen: parametric footprint package generator
//!
//! Generates footprint packages for two-terminal chip components from a
//! small table of part dimensions. Every generated element gets a UUID
//! that stays stable across regenerations.
//!
//! # Architecture
//!
//! ```text
//! catalog ──> footprint (layout) ──> library (build, render) ──> store
//!                                       ^
//!                                   UuidCache
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Part families and the standard chip resistor table
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Configuration, part and template errors
//! - [`footprint`] - Geometry of pads, outlines, silkscreen and labels
//! - [`generate`] - Generation runs
//! - [`library`] - Package documents, UUID cache and output

pub mod catalog;
pub mod config;
pub mod error;
pub mod footprint;
pub mod generate;
pub mod library;
