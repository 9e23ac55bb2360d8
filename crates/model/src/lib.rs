//! # Domain models
//!
//! The batched transition/reward models driven by the rollout engine.
//!
//! -   [`Model`] is the interface the rest of the workspace consumes: fluent
//!     metadata, non-fluent and initial-state values, and a batched
//!     [`transition`](Model::transition).
//! -   [`NavigationModel`] implements the Navigation domain, where a point
//!     agent heads for a goal through multiplicative deceleration zones.
//! -   [`NonFluents`] and [`Zone`] are the typed view of the navigation
//!     constants used when plotting.

pub mod env;
pub mod error;
pub mod fluent;
pub mod navigation;
pub mod zone;

pub use env::{Model, Transition};
pub use error::ModelError;
pub use fluent::{FluentSpec, Fluents};
pub use navigation::{NavigationModel, NavigationParams};
pub use zone::{potential, validate_zones, NonFluents, Zone};
