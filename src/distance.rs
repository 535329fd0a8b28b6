use nalgebra::Vector2;
use ndarray::Array1;

use crate::dataset::Point;
use crate::input::Centroid;

/// Squared euclidean distance of every point to each centroid, aligned by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Distances {
    pub r1_sq: Array1<f64>,
    pub r2_sq: Array1<f64>,
}

impl Distances {
    pub fn len(&self) -> usize {
        self.r1_sq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r1_sq.is_empty()
    }
}

pub fn squared_distance(point: &Point, centroid: &Centroid) -> f64 {
    (Vector2::new(point.x1, point.x2) - centroid).norm_squared()
}

pub fn squared_distances(points: &[Point], c1: &Centroid, c2: &Centroid) -> Distances {
    let column = |centroid: &Centroid| {
        points
            .iter()
            .map(|point| squared_distance(point, centroid))
            .collect::<Array1<f64>>()
    };

    Distances {
        r1_sq: column(c1),
        r2_sq: column(c2),
    }
}
