//! Raster plots for navigation rollouts and policies.
//!
//! Everything is drawn onto [`image::RgbaImage`] panels through a
//! [`Canvas`], which owns the data-to-pixel transform. The potential of a
//! set of deceleration zones is the common background; policy panels and
//! trajectory plots are layered on top of it.

pub mod canvas;
pub mod colormap;
pub mod error;
pub mod figure;
pub mod policy_plot;
pub mod potential;
pub mod stream;
pub mod visualizer;

pub use canvas::{Canvas, Stroke};
pub use error::RenderError;
pub use figure::{policy_figure, Figure, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use policy_plot::{PolicyPlot, PolicyScene};
pub use potential::{compute_field, PotentialField, LEVELS};
pub use stream::streamlines;
pub use visualizer::{GenericVisualizer, NavigationVisualizer, Visualizer, VisualizerKind};
