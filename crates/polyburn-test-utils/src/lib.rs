//! Test utilities and fakes for Polyburn development.
//!
//! Provides [`ToySimulation`], a small deterministic rocket that
//! implements [`Simulation`](polyburn_core::Simulation) without a physics
//! engine, an in-memory [`MemoryRunStore`], and reusable frame
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
mod store;
mod toy;

pub use store::MemoryRunStore;
pub use toy::{Checkpoint, Course, ToySimulation};
