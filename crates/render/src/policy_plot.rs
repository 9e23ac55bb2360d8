//! Policy actions over the potential field, as arrows or streamlines.

use crate::canvas::{Canvas, Stroke, CRIMSON, DODGER_BLUE, LIME_GREEN};
use crate::error::RenderError;
use crate::potential::compute_field;
use crate::stream::{draw_streamlines, streamlines, DEFAULT_DENSITY, STREAM_ALPHA, STREAM_COLOR};
use glam::Vec2;
use model::NonFluents;
use rl::{Bounds, FieldSamples};

/// Mesh resolution of the background potential.
pub const FIELD_RESOLUTION: usize = 100;

/// Everything a policy panel shows.
pub struct PolicyScene<'a> {
    pub bounds: Bounds,
    pub non_fluents: &'a NonFluents,
    pub field: &'a FieldSamples,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyPlot {
    /// One arrow per grid point plus the sampled states.
    Field,
    /// Streamlines through the reshaped grid.
    Stream,
}

impl PolicyPlot {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PolicyPlot::Field => "Policy",
            PolicyPlot::Stream => "Policy Stream",
        }
    }

    /// Draws the potential, then the actions, then start and goal markers.
    ///
    /// # Errors
    ///
    /// The stream variant needs the samples to form a square grid; that is
    /// checked before anything is drawn. Invalid zone decay is rejected.
    pub fn draw(self, canvas: &mut Canvas, scene: &PolicyScene<'_>) -> Result<(), RenderError> {
        let grid = match self {
            PolicyPlot::Stream => Some(scene.field.as_grid()?),
            PolicyPlot::Field => None,
        };
        let potential = compute_field(&scene.bounds, &scene.non_fluents.zones, FIELD_RESOLUTION)?;

        canvas.grid();
        potential.draw(canvas);

        match grid {
            None => draw_quiver(canvas, scene.field),
            Some(grid) => {
                let lines = streamlines(&grid, DEFAULT_DENSITY);
                draw_streamlines(canvas, &lines, STREAM_COLOR, STREAM_ALPHA);
            }
        }

        draw_endpoints(canvas, scene.non_fluents);
        tracing::debug!(plot = self.title(), samples = scene.field.len(), "policy panel drawn");
        Ok(())
    }
}

/// Arrows in data units from each sampled state along its action.
fn draw_quiver(canvas: &mut Canvas, field: &FieldSamples) {
    let arrows = Stroke::solid(DODGER_BLUE).alpha(0.7);
    for s in field.samples() {
        let from = Vec2::from(s.state);
        canvas.arrow(from, from + Vec2::from(s.action), 6.0, arrows);
    }
    for s in field.samples() {
        canvas.dot(Vec2::from(s.state), 1.5, DODGER_BLUE, 0.5);
    }
}

/// Start (lime green) and goal (crimson) crosses.
pub fn draw_endpoints(canvas: &mut Canvas, non_fluents: &NonFluents) {
    canvas.x_marker(Vec2::from(non_fluents.start), 12.0, LIME_GREEN, 3.0);
    canvas.x_marker(Vec2::from(non_fluents.goal), 12.0, CRIMSON, 3.0);
}
