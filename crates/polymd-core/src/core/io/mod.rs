//! Readers for the file formats the external engine produces.
//!
//! Two formats matter to the analysis layer: the text PDB topology written
//! alongside a production run ([`pdb`]) and the binary DCD trajectory holding
//! the sampled frames ([`dcd`]). Both readers parse into the immutable models
//! from [`crate::core::models`] and report malformed input through typed,
//! per-format error enums.

pub mod dcd;
pub mod pdb;
