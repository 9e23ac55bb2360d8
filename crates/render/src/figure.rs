use crate::canvas::{Canvas, WHITE};
use crate::error::RenderError;
use crate::policy_plot::{PolicyPlot, PolicyScene};
use image::RgbaImage;
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Panels laid out left to right on one image.
pub struct Figure {
    image: RgbaImage,
    panels: usize,
}

impl Figure {
    #[must_use]
    pub fn new(width: u32, height: u32, panels: usize) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, WHITE), panels: panels.max(1) }
    }

    /// Pixel size of one panel.
    #[must_use]
    pub fn panel_size(&self) -> (u32, u32) {
        (self.image.width() / self.panels as u32, self.image.height())
    }

    /// Copies `canvas` into slot `index`.
    pub fn place(&mut self, index: usize, canvas: &Canvas) -> Result<(), RenderError> {
        if index >= self.panels {
            return Err(RenderError::Panel { index, panels: self.panels });
        }
        let x = i64::from(self.panel_size().0) * index as i64;
        image::imageops::replace(&mut self.image, canvas.image(), x, 0);
        Ok(())
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Writes the figure as PNG.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        tracing::info!(path = %path.display(), "figure saved");
        Ok(())
    }
}

/// The policy as arrows (left) and streamlines (right).
pub fn policy_figure(scene: &PolicyScene<'_>, width: u32, height: u32) -> Result<Figure, RenderError> {
    let plots = [PolicyPlot::Field, PolicyPlot::Stream];
    let mut figure = Figure::new(width, height, plots.len());
    let (w, h) = figure.panel_size();
    for (index, plot) in plots.into_iter().enumerate() {
        let mut canvas = Canvas::new(w, h, scene.bounds);
        plot.draw(&mut canvas, scene)?;
        figure.place(index, &canvas)?;
    }
    Ok(figure)
}
