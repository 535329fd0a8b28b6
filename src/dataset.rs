use std::fmt;

use crate::error::{RbfError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Light,
    Dark,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Light, Category::Dark];

    /// Maps a raw label to its category. Only `1` and `0` are recognised.
    pub fn from_label(label: f64) -> Option<Self> {
        #[allow(clippy::float_cmp)]
        if label == 1.0 {
            Some(Category::Light)
        } else if label == 0.0 {
            Some(Category::Dark)
        } else {
            None
        }
    }

    pub fn label(self) -> f64 {
        match self {
            Category::Light => 1.0,
            Category::Dark => 0.0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Light => f.write_str("Light"),
            Category::Dark => f.write_str("Dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub category: f64, // raw label as entered, 1 for light and 0 for dark
    pub x1: f64,
    pub x2: f64,
}

impl Point {
    pub fn new(category: f64, x1: f64, x2: f64) -> Self {
        Self { category, x1, x2 }
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_label(self.category)
    }
}

/// The editable point table. Row order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) -> Result<()> {
        if !(point.category.is_finite() && point.x1.is_finite() && point.x2.is_finite()) {
            return Err(RbfError::InvalidRow(format!(
                "values must be finite, got ({}, {}, {})",
                point.category, point.x1, point.x2
            )));
        }

        self.points.push(point);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Point> {
        if index >= self.points.len() {
            return Err(RbfError::RowOutOfRange {
                index,
                len: self.points.len(),
            });
        }

        Ok(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rows whose label is neither `0` nor `1`.
    pub fn unlabelled_rows(&self) -> usize {
        self.points.iter().filter(|p| p.category().is_none()).count()
    }
}

impl TryFrom<Vec<Point>> for Dataset {
    type Error = RbfError;

    /// Validates every point the same way [`Dataset::push`] does.
    fn try_from(points: Vec<Point>) -> Result<Self> {
        let mut dataset = Self::new();
        for point in points {
            dataset.push(point)?;
        }
        Ok(dataset)
    }
}
