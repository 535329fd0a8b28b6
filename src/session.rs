//! One interactive run: the point table, the parameter form and whatever has
//! been derived from them so far.
//!
//! The session moves through three states:
//!
//! ```text
//! AwaitingInput --calculate_r--> DistancesComputed --calculate_phi--> TransformComputed
//!       ^                                                                   |
//!       +---------------------- any edit to points or fields ---------------+
//! ```
//!
//! Derived columns are dropped on every edit so they never disagree with the
//! inputs they were computed from.

use std::fmt;
use tracing::{debug, info, warn};

use crate::dataset::{Dataset, Point};
use crate::distance::{squared_distances, Distances};
use crate::error::{RbfError, Result};
use crate::input::{Field, InputStatus, ParameterForm, Parameters, MISSING_INPUT_PROMPT};
use crate::table::AugmentedTable;
use crate::transform::{rbf_features, Features};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CalculateR,
    CalculatePhi,
    ShowTable,
    Plot,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::CalculateR => f.write_str("calculate R"),
            Step::CalculatePhi => f.write_str("calculate phi"),
            Step::ShowTable => f.write_str("show table"),
            Step::Plot => f.write_str("plot"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingInput,
    DistancesComputed,
    TransformComputed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::AwaitingInput => f.write_str("awaiting input"),
            State::DistancesComputed => f.write_str("distances computed"),
            State::TransformComputed => f.write_str("transform computed"),
        }
    }
}

#[derive(Debug, Clone)]
enum Stage {
    AwaitingInput,
    DistancesComputed {
        parameters: Parameters,
        distances: Distances,
    },
    TransformComputed {
        parameters: Parameters,
        distances: Distances,
        features: Features,
    },
}

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    form: ParameterForm,
    stage: Stage,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Dataset::new(), ParameterForm::default())
    }
}

impl Session {
    pub fn new(dataset: Dataset, form: ParameterForm) -> Self {
        Self {
            dataset,
            form,
            stage: Stage::AwaitingInput,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn form(&self) -> &ParameterForm {
        &self.form
    }

    pub fn input_status(&self) -> InputStatus {
        self.form.status()
    }

    pub fn state(&self) -> State {
        match self.stage {
            Stage::AwaitingInput => State::AwaitingInput,
            Stage::DistancesComputed { .. } => State::DistancesComputed,
            Stage::TransformComputed { .. } => State::TransformComputed,
        }
    }

    /// Parameters the current derived columns were computed with.
    pub fn parameters(&self) -> Option<&Parameters> {
        match &self.stage {
            Stage::AwaitingInput => None,
            Stage::DistancesComputed { parameters, .. }
            | Stage::TransformComputed { parameters, .. } => Some(parameters),
        }
    }

    pub fn distances(&self) -> Option<&Distances> {
        match &self.stage {
            Stage::AwaitingInput => None,
            Stage::DistancesComputed { distances, .. }
            | Stage::TransformComputed { distances, .. } => Some(distances),
        }
    }

    pub fn features(&self) -> Option<&Features> {
        match &self.stage {
            Stage::TransformComputed { features, .. } => Some(features),
            _ => None,
        }
    }

    pub fn add_point(&mut self, point: Point) -> Result<()> {
        self.dataset.push(point)?;
        self.invalidate();
        Ok(())
    }

    pub fn remove_point(&mut self, index: usize) -> Result<Point> {
        let point = self.dataset.remove(index)?;
        self.invalidate();
        Ok(point)
    }

    pub fn clear_points(&mut self) {
        self.dataset.clear();
        self.invalidate();
    }

    pub fn replace_points(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.invalidate();
    }

    pub fn set_field(&mut self, field: Field, text: &str) {
        self.form.set(field, text);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        if !matches!(self.stage, Stage::AwaitingInput) {
            debug!(state = %self.state(), "inputs changed, discarding derived columns");
            self.stage = Stage::AwaitingInput;
        }
    }

    /// Computes `r1 ^2` and `r2 ^2` for every row. Allowed once the parameter
    /// fields are valid; rerunning from a later state drops the phi columns.
    pub fn calculate_r(&mut self) -> Result<()> {
        let parameters = match self.form.status() {
            InputStatus::Ready(parameters) => parameters,
            InputStatus::Missing(_) => return Err(RbfError::MissingInput(MISSING_INPUT_PROMPT)),
            InputStatus::Invalid(err) => {
                warn!(%err, "refusing to {}", Step::CalculateR);
                return Err(err);
            }
        };

        if self.dataset.is_empty() {
            warn!("calculating distances for an empty table");
        }

        let distances = squared_distances(self.dataset.points(), &parameters.c1, &parameters.c2);
        debug!(rows = distances.len(), "computed squared distances");

        self.stage = Stage::DistancesComputed {
            parameters,
            distances,
        };
        info!(rows = self.dataset.len(), "step complete: {}", Step::CalculateR);

        Ok(())
    }

    /// Computes `φ1` and `φ2` from the distances of the last [`Self::calculate_r`].
    /// A rejected variance leaves the distances in place.
    pub fn calculate_phi(&mut self) -> Result<()> {
        let stage = std::mem::replace(&mut self.stage, Stage::AwaitingInput);

        let (parameters, distances) = match stage {
            Stage::AwaitingInput => {
                return Err(RbfError::StepNotReady {
                    step: Step::CalculatePhi,
                    reason: "distances have not been calculated",
                })
            }
            Stage::DistancesComputed {
                parameters,
                distances,
            }
            | Stage::TransformComputed {
                parameters,
                distances,
                ..
            } => (parameters, distances),
        };

        match rbf_features(&distances, parameters.sigma_sq) {
            Ok(features) => {
                debug!(
                    rows = features.phi1.len(),
                    sigma_sq = parameters.sigma_sq,
                    "computed rbf features"
                );
                self.stage = Stage::TransformComputed {
                    parameters,
                    distances,
                    features,
                };
                info!(rows = self.dataset.len(), "step complete: {}", Step::CalculatePhi);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "refusing to {}", Step::CalculatePhi);
                self.stage = Stage::DistancesComputed {
                    parameters,
                    distances,
                };
                Err(err)
            }
        }
    }

    /// The full table with every derived column. Requires the transform step.
    pub fn table(&self) -> Result<AugmentedTable> {
        self.augmented(Step::ShowTable)
    }

    pub(crate) fn augmented(&self, step: Step) -> Result<AugmentedTable> {
        match &self.stage {
            Stage::TransformComputed {
                distances,
                features,
                ..
            } => Ok(AugmentedTable::new(self.dataset.points(), distances, features)),
            _ => Err(RbfError::StepNotReady {
                step,
                reason: "phi has not been calculated",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ready_session() -> Session {
        let dataset =
            Dataset::try_from(vec![Point::new(1.0, 1.0, 1.0), Point::new(0.0, 0.0, 0.0)])
                .unwrap();

        Session::new(dataset, ParameterForm::new("0,0", "2,2", "2"))
    }

    #[test]
    fn test_full_pipeline() {
        let mut session = ready_session();
        assert_eq!(session.state(), State::AwaitingInput);

        session.calculate_r().unwrap();
        assert_eq!(session.state(), State::DistancesComputed);
        assert_eq!(session.distances().unwrap().r1_sq.to_vec(), vec![2.0, 0.0]);
        assert_eq!(session.distances().unwrap().r2_sq.to_vec(), vec![2.0, 8.0]);

        session.calculate_phi().unwrap();
        assert_eq!(session.state(), State::TransformComputed);

        let features = session.features().unwrap();
        assert_abs_diff_eq!(features.phi1[0], (-0.5f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(features.phi2[0], (-0.5f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(features.phi1[1], 1.0);
        assert_abs_diff_eq!(features.phi2[1], (-2.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_phi_before_r_is_refused() {
        let mut session = ready_session();

        assert!(matches!(
            session.calculate_phi(),
            Err(RbfError::StepNotReady {
                step: Step::CalculatePhi,
                ..
            })
        ));
        assert_eq!(session.state(), State::AwaitingInput);
    }

    #[test]
    fn test_table_before_phi_is_refused() {
        let mut session = ready_session();
        assert!(session.table().is_err());

        session.calculate_r().unwrap();
        assert!(matches!(
            session.table(),
            Err(RbfError::StepNotReady {
                step: Step::ShowTable,
                ..
            })
        ));
    }

    #[test]
    fn test_r_refused_without_valid_input() {
        let mut session = Session::default();
        assert!(matches!(
            session.calculate_r(),
            Err(RbfError::MissingInput(_))
        ));

        session.set_field(Field::C1, "1,a");
        session.set_field(Field::C2, "0,0");
        session.set_field(Field::SigmaSq, "1");
        assert!(matches!(
            session.calculate_r(),
            Err(RbfError::InvalidNumber { .. })
        ));
        assert_eq!(session.state(), State::AwaitingInput);
    }

    #[test]
    fn test_non_finite_centroid_blocks_distances() {
        let mut session = ready_session();
        session.set_field(Field::C1, "nan,0");
        session.set_field(Field::C2, "inf,0");

        assert!(matches!(
            session.calculate_r(),
            Err(RbfError::InvalidNumber { field: "c1", .. })
        ));
        assert_eq!(session.state(), State::AwaitingInput);
        assert!(session.distances().is_none());
    }

    #[test]
    fn test_zero_variance_keeps_distances() {
        let mut session = ready_session();
        session.set_field(Field::SigmaSq, "0");

        session.calculate_r().unwrap();
        assert!(matches!(
            session.calculate_phi(),
            Err(RbfError::ZeroVariance)
        ));
        assert_eq!(session.state(), State::DistancesComputed);
        assert!(session.features().is_none());
    }

    #[test]
    fn test_edits_invalidate_derived_columns() {
        let mut session = ready_session();
        session.calculate_r().unwrap();
        session.calculate_phi().unwrap();

        session.add_point(Point::new(1.0, 5.0, 5.0)).unwrap();
        assert_eq!(session.state(), State::AwaitingInput);
        assert!(session.distances().is_none());

        session.calculate_r().unwrap();
        assert_eq!(session.distances().unwrap().len(), 3);

        session.set_field(Field::C1, "1,1");
        assert_eq!(session.state(), State::AwaitingInput);

        session.calculate_r().unwrap();
        session.remove_point(0).unwrap();
        assert_eq!(session.state(), State::AwaitingInput);
    }

    #[test]
    fn test_rerunning_r_is_idempotent() {
        let mut session = ready_session();
        session.calculate_r().unwrap();
        let first = session.distances().unwrap().clone();

        session.calculate_phi().unwrap();
        session.calculate_r().unwrap();

        assert_eq!(session.state(), State::DistancesComputed);
        assert_eq!(session.distances().unwrap(), &first);
    }
}
