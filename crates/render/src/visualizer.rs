//! Qualitative views of a whole rollout.

use crate::canvas::{Canvas, Stroke, DODGER_BLUE};
use crate::error::RenderError;
use crate::figure::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::policy_plot::{draw_endpoints, FIELD_RESOLUTION};
use crate::potential::compute_field;
use glam::Vec2;
use model::{FluentSpec, Model, NonFluents};
use rl::{Bounds, PerformanceStats, TrajectoryBundle};
use std::path::PathBuf;

pub const DEFAULT_TRAJECTORY_PLOT: &str = "trajectories.png";

pub trait Visualizer {
    fn name(&self) -> &'static str;

    fn render(&mut self, bundle: &TrajectoryBundle) -> Result<(), RenderError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualizerKind {
    Generic,
    Navigation,
}

impl VisualizerKind {
    /// Builds the visualizer for `model`. `output` is only used by
    /// [`VisualizerKind::Navigation`] and defaults to
    /// [`DEFAULT_TRAJECTORY_PLOT`].
    ///
    /// # Errors
    ///
    /// The navigation view needs the model's goal, start and zone
    /// fluents.
    pub fn build<M: Model + ?Sized>(
        self,
        model: &M,
        verbose: bool,
        output: Option<PathBuf>,
    ) -> Result<Box<dyn Visualizer>, RenderError> {
        Ok(match self {
            VisualizerKind::Generic => Box::new(GenericVisualizer::new(model, verbose)),
            VisualizerKind::Navigation => Box::new(NavigationVisualizer {
                non_fluents: NonFluents::from_model(model)?,
                verbose,
                output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_TRAJECTORY_PLOT)),
            }),
        })
    }
}

/// Text dump of a rollout: per-trajectory totals at `info`, and every
/// step's fluents on stdout in verbose mode.
pub struct GenericVisualizer {
    state_fluents: Vec<FluentSpec>,
    action_fluents: Vec<FluentSpec>,
    interm_fluents: Vec<FluentSpec>,
    verbose: bool,
}

impl GenericVisualizer {
    pub fn new<M: Model + ?Sized>(model: &M, verbose: bool) -> Self {
        Self {
            state_fluents: model.state_fluents().to_vec(),
            action_fluents: model.action_fluents().to_vec(),
            interm_fluents: model.interm_fluents().to_vec(),
            verbose,
        }
    }

    fn print_fluents(kind: &str, specs: &[FluentSpec], row: &[f32]) {
        let mut offset = 0;
        for spec in specs {
            let end = (offset + spec.size).min(row.len());
            println!("  {kind} {} = {:?}", spec.name, &row[offset..end]);
            offset = end;
        }
    }
}

impl Visualizer for GenericVisualizer {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn render(&mut self, bundle: &TrajectoryBundle) -> Result<(), RenderError> {
        let stats = PerformanceStats::from_bundle(bundle)?;
        for (b, total) in stats.per_trajectory_total_reward.iter().enumerate() {
            tracing::info!(trajectory = b, total_reward = total, "trajectory summary");
            if !self.verbose {
                continue;
            }
            println!(">> trajectory {b}");
            for t in 0..bundle.horizon() {
                println!("step {t}");
                Self::print_fluents("state ", &self.state_fluents, bundle.state(b, t));
                Self::print_fluents("action", &self.action_fluents, bundle.action(b, t));
                Self::print_fluents("interm", &self.interm_fluents, bundle.interm(b, t));
                println!("  reward = {:.6}", bundle.reward(b, t));
            }
        }
        Ok(())
    }
}

/// Every trajectory's path drawn over the potential field, saved as PNG.
pub struct NavigationVisualizer {
    non_fluents: NonFluents,
    verbose: bool,
    output: PathBuf,
}

impl NavigationVisualizer {
    /// Smallest rectangle holding every path, zone centre, start and goal,
    /// with a unit margin.
    fn extent(&self, paths: &[Vec<Vec2>]) -> Result<Bounds, RenderError> {
        let nf = &self.non_fluents;
        let fixed = [Vec2::from(nf.start), Vec2::from(nf.goal)];
        let zones = nf.zones.iter().map(|z| Vec2::new(z.center_x, z.center_y));
        let all = paths.iter().flatten().copied().chain(fixed).chain(zones).filter(|p| p.is_finite());
        let (lo, hi) = all.fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Ok(Bounds::new(lo.x - 1.0, hi.x + 1.0, lo.y - 1.0, hi.y + 1.0)?)
    }
}

impl Visualizer for NavigationVisualizer {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn render(&mut self, bundle: &TrajectoryBundle) -> Result<(), RenderError> {
        let horizon = bundle.horizon();
        let paths: Vec<Vec<Vec2>> = (0..bundle.batch_size())
            .map(|b| {
                let start = bundle.initial_state().row(b);
                std::iter::once(Vec2::new(start[0], start[1]))
                    .chain((0..horizon).map(|t| {
                        let s = bundle.next_state(b, t);
                        Vec2::new(s[0], s[1])
                    }))
                    .collect()
            })
            .collect();

        let bounds = self.extent(&paths)?;
        let field = compute_field(&bounds, &self.non_fluents.zones, FIELD_RESOLUTION)?;
        let mut canvas = Canvas::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, bounds);
        canvas.grid();
        field.draw(&mut canvas);

        let style = Stroke::solid(DODGER_BLUE).alpha(0.3).width(1.5);
        for path in &paths {
            canvas.polyline(path, style);
            if self.verbose {
                if let Some(last) = path.last() {
                    canvas.dot(*last, 2.0, DODGER_BLUE, 0.8);
                }
            }
        }
        draw_endpoints(&mut canvas, &self.non_fluents);

        canvas.into_image().save_with_format(&self.output, image::ImageFormat::Png)?;
        tracing::info!(path = %self.output.display(), trajectories = paths.len(), "trajectory plot saved");
        Ok(())
    }
}
