//! The three free-text parameter fields and their validation.

use nalgebra::Vector2;

use crate::error::{RbfError, Result};
use crate::parse::{parse_scalar, parse_vector};

pub const INVALID_INPUT_WARNING: &str = "Invalid input detected. Please enter correct values.";
pub const MISSING_INPUT_PROMPT: &str = "Please provide input data to proceed.";

pub type Centroid = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub c1: Centroid,
    pub c2: Centroid,
    pub sigma_sq: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    C1,
    C2,
    SigmaSq,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::C1 => "c1",
            Field::C2 => "c2",
            Field::SigmaSq => "sigma_sq",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterForm {
    pub c1: String,
    pub c2: String,
    pub sigma_sq: String,
}

#[derive(Debug)]
pub enum InputStatus {
    Missing(Vec<Field>),
    Invalid(RbfError),
    Ready(Parameters),
}

impl InputStatus {
    pub fn parameters(&self) -> Option<&Parameters> {
        match self {
            InputStatus::Ready(parameters) => Some(parameters),
            _ => None,
        }
    }

    /// The line shown to the user for this status.
    pub fn message(&self) -> String {
        match self {
            InputStatus::Missing(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();
                format!("{MISSING_INPUT_PROMPT} (missing: {})", names.join(", "))
            }
            InputStatus::Invalid(err) => format!("{INVALID_INPUT_WARNING} ({err})"),
            InputStatus::Ready(p) => format!(
                "c1 = ({}, {}), c2 = ({}, {}), sigma_sq = {}",
                p.c1.x, p.c1.y, p.c2.x, p.c2.y, p.sigma_sq
            ),
        }
    }
}

impl ParameterForm {
    pub fn new(c1: &str, c2: &str, sigma_sq: &str) -> Self {
        Self {
            c1: c1.to_string(),
            c2: c2.to_string(),
            sigma_sq: sigma_sq.to_string(),
        }
    }

    pub fn set(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::C1 => &mut self.c1,
            Field::C2 => &mut self.c2,
            Field::SigmaSq => &mut self.sigma_sq,
        };
        *slot = text.trim().to_string();
    }

    pub fn status(&self) -> InputStatus {
        let missing: Vec<Field> = [
            (Field::C1, &self.c1),
            (Field::C2, &self.c2),
            (Field::SigmaSq, &self.sigma_sq),
        ]
        .into_iter()
        .filter(|(_, text)| text.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return InputStatus::Missing(missing);
        }

        match self.validate() {
            Ok(parameters) => InputStatus::Ready(parameters),
            Err(err) => InputStatus::Invalid(err),
        }
    }

    /// Variance sign is not checked here, the transform step rejects it.
    fn validate(&self) -> Result<Parameters> {
        Ok(Parameters {
            c1: to_centroid(Field::C1, &self.c1)?,
            c2: to_centroid(Field::C2, &self.c2)?,
            sigma_sq: parse_scalar(Field::SigmaSq.name(), &self.sigma_sq)?,
        })
    }
}

fn to_centroid(field: Field, text: &str) -> Result<Centroid> {
    let values = parse_vector(field.name(), text)?;

    if let Some(value) = values.iter().find(|value| !value.is_finite()) {
        return Err(RbfError::InvalidNumber {
            field: field.name(),
            token: value.to_string(),
        });
    }

    match values.as_slice() {
        &[first, second] => Ok(Centroid::new(first, second)),
        values => Err(RbfError::CentroidDimension {
            field: field.name(),
            expected: 2,
            actual: values.len(),
        }),
    }
}
