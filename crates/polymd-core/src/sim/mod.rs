//! # Simulation Orchestration Module
//!
//! Everything between this library and the external simulation engine lives
//! here: the typed configuration documents the engine consumes, the shipped
//! scenario presets, and the sequential phase runner that drives the engine
//! as a blocking subprocess.
//!
//! ## Architecture
//!
//! - **Engine Parameters** ([`config`]) - The simulation-parameters document
//!   and its builder
//! - **Composition** ([`components`]) - The manifest mapping chain species to
//!   molecule counts and input files
//! - **Scenarios** ([`scenario`]) - The two shipped compositions and their
//!   phase directories
//! - **Execution** ([`runner`]) - Phase sequencing, subprocess invocation, and
//!   production-artifact discovery
//! - **Error Handling** ([`error`]) - Orchestration-specific error types

pub mod components;
pub mod config;
pub mod error;
pub mod runner;
pub mod scenario;
