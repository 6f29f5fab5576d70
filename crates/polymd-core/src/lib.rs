//! # polymd Core Library
//!
//! A library for configuring, launching, and post-processing coarse-grained
//! molecular-dynamics simulations of polymer mixtures (polyallylamine and
//! glutaraldehyde) driven by an external simulation engine.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict layered architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Topology`,
//!   `Trajectory`, `Frame`), file-format readers for the engine's outputs
//!   (PDB topology, DCD trajectory), and geometry utilities (minimum-image
//!   distances, unit conversion).
//!
//! - **[`engine`]: The Analysis Core.** Implements the inter-chain contact
//!   analysis: atom-group resolution with an explicit fallback policy,
//!   per-frame contact counting, and series statistics, together with the
//!   progress-reporting seam used by long-running passes.
//!
//! - **[`sim`]: The Orchestration Layer.** Builds the configuration documents
//!   consumed by the external engine, materializes scenario directories, and
//!   drives the minimization → equilibration → production phase sequence as
//!   blocking subprocess invocations with fail-fast semantics.
//!
//! - **[`report`]: Derived Outputs.** Renders the contact time-series and
//!   histogram figures, the per-frame series export, and the fixed-layout
//!   plain-text summary.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the other layers together to execute complete procedures: one
//!   contact-analysis pass over a trajectory, or a full simulation campaign.

pub mod core;
pub mod engine;
pub mod report;
pub mod sim;
pub mod workflows;
