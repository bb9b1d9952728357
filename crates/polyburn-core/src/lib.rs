//! Core types and traits for Polyburn deterministic replays.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the replay codec, the replayer and the
//! follow tracker: recorded frames, per-tick simulation input, run
//! statistics, 2D points, error types, and the narrow [`Simulation`]
//! capability trait through which the physics engine is driven.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod traits;

pub use error::{ConfigError, FormatError, Section};
pub use events::EventCursor;
pub use frame::{Frame, RunStats, TickInput};
pub use geometry::Point2;
pub use traits::{Simulation, SimulationFactory};
