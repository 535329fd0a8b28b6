use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::dataset::Point;
use crate::distance::Distances;
use crate::error::Result;
use crate::transform::Features;

pub const HEADERS: [&str; 7] = ["category", "x1", "x2", "r1 ^2", "r2 ^2", "φ1", "φ2"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Row {
    pub category: f64,
    pub x1: f64,
    pub x2: f64,
    pub r1_sq: f64,
    pub r2_sq: f64,
    pub phi1: f64,
    pub phi2: f64,
}

impl Row {
    fn cells(&self) -> [f64; 7] {
        [
            self.category,
            self.x1,
            self.x2,
            self.r1_sq,
            self.r2_sq,
            self.phi1,
            self.phi2,
        ]
    }
}

/// Original columns joined with every derived column, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedTable {
    rows: Vec<Row>,
}

impl AugmentedTable {
    pub fn new(points: &[Point], distances: &Distances, features: &Features) -> Self {
        let rows = points
            .iter()
            .enumerate()
            .map(|(i, point)| Row {
                category: point.category,
                x1: point.x1,
                x2: point.x2,
                r1_sq: distances.r1_sq[i],
                r2_sq: distances.r2_sq[i],
                phi1: features.phi1[i],
                phi2: features.phi2[i],
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);

        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        Ok(())
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        self.write_csv(File::create(path)?)?;
        info!(path = %path.display(), rows = self.rows.len(), "exported table");

        Ok(())
    }
}

impl fmt::Display for AugmentedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const INDEX_WIDTH: usize = 5;
        const CELL_WIDTH: usize = 10;

        write!(f, "{:>INDEX_WIDTH$}", "")?;
        for header in HEADERS {
            write!(f, " {header:>CELL_WIDTH$}")?;
        }
        writeln!(f)?;

        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{i:>INDEX_WIDTH$}")?;
            for cell in row.cells() {
                write!(f, " {cell:>CELL_WIDTH$.4}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
