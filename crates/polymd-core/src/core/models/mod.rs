//! Data structures describing the simulated system and its time evolution.
//!
//! A [`topology::Topology`] is the static picture: one record per atom, in the
//! order the engine wrote them, carrying the residue labels the analysis layer
//! partitions on. A [`trajectory::Trajectory`] is the dynamic picture: an
//! ordered sequence of [`frame::Frame`]s, each holding one position per atom
//! plus the periodic box recorded with it. All three are immutable once
//! constructed and are owned by a single analysis run for its lifetime.

pub mod frame;
pub mod topology;
pub mod trajectory;
