//! Scatter plots of the original and the transformed feature space.

use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::PlotConfig;
use crate::dataset::Category;
use crate::error::{RbfError, Result};
use crate::session::{Session, Step};
use crate::table::{AugmentedTable, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Original,
    Transformed,
}

impl Space {
    pub fn title(self) -> &'static str {
        match self {
            Space::Original => "Original feature space",
            Space::Transformed => "Transformed feature space",
        }
    }

    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Space::Original => ("X1", "X2"),
            Space::Transformed => ("φ1", "φ2"),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Space::Original => "original_space.png",
            Space::Transformed => "transformed_space.png",
        }
    }

    fn coordinates(self, row: &Row) -> (f64, f64) {
        match self {
            Space::Original => (row.x1, row.x2),
            Space::Transformed => (row.phi1, row.phi2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub category: Category,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub space: Space,
    pub series: Vec<Series>,
    /// Rows left out because their category is neither 0 nor 1.
    pub excluded: usize,
}

impl ScatterPlot {
    pub fn from_table(table: &AugmentedTable, space: Space) -> Self {
        let series = Category::ALL
            .iter()
            .map(|&category| Series {
                category,
                points: table
                    .rows()
                    .iter()
                    .filter(|row| Category::from_label(row.category) == Some(category))
                    .map(|row| space.coordinates(row))
                    .collect(),
            })
            .collect();

        let excluded = table
            .rows()
            .iter()
            .filter(|row| Category::from_label(row.category).is_none())
            .count();

        Self {
            space,
            series,
            excluded,
        }
    }

    pub fn series(&self, category: Category) -> &[(f64, f64)] {
        self.series
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.points.as_slice())
            .unwrap_or_default()
    }

    fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let points = self.series.iter().flat_map(|s| s.points.iter());

        let (xs, ys): (Vec<f64>, Vec<f64>) = points.copied().unzip();

        (padded_range(&xs), padded_range(&ys))
    }

    pub fn render(&self, path: &Path, config: &PlotConfig) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let (x_range, y_range) = self.bounds();
        let (x_label, y_label) = self.space.axis_labels();

        let mut chart = ChartBuilder::on(&root)
            .caption(self.space.title(), ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .draw()
            .map_err(plot_error)?;

        let size = config.point_size;
        for series in &self.series {
            let color = config.color(series.category);

            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), size, color.filled())),
                )
                .map_err(plot_error)?
                .label(series.category.to_string())
                .legend(move |(x, y)| Circle::new((x, y), size, color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;

        Ok(())
    }
}

fn plot_error<E: Display>(err: E) -> RbfError {
    RbfError::Plot(err.to_string())
}

fn padded_range(values: &[f64]) -> Range<f64> {
    const PADDING_RATIO: f64 = 0.1;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    let padding = if max - min > f64::EPSILON {
        (max - min) * PADDING_RATIO
    } else {
        1.0
    };

    (min - padding)..(max + padding)
}

/// Both plots for a session whose transform step has run.
pub fn scatter_plots(session: &Session) -> Result<[ScatterPlot; 2]> {
    let table = session.augmented(Step::Plot)?;

    let plots =
        [Space::Original, Space::Transformed].map(|space| ScatterPlot::from_table(&table, space));

    if plots[0].excluded > 0 {
        warn!(
            excluded = plots[0].excluded,
            "rows with a category other than 0 or 1 are not plotted"
        );
    }

    Ok(plots)
}

/// Writes both plots into `config.output_dir` and returns the file paths.
pub fn render_plots(session: &Session, config: &PlotConfig) -> Result<Vec<PathBuf>> {
    let plots = scatter_plots(session)?;
    std::fs::create_dir_all(&config.output_dir)?;

    let mut paths = Vec::with_capacity(plots.len());
    for plot in &plots {
        let path = config.output_dir.join(plot.space.file_name());
        plot.render(&path, config)?;
        info!(path = %path.display(), "wrote {}", plot.space.title().to_lowercase());
        paths.push(path);
    }

    Ok(paths)
}
