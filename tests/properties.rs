//! Property-based tests for the distance and transform steps.

use proptest::prelude::*;
use rbf::dataset::{Category, Dataset, Point};
use rbf::distance::squared_distances;
use rbf::input::{Centroid, ParameterForm};
use rbf::plot::scatter_plots;
use rbf::session::Session;
use rbf::transform::{rbf_features, GaussianKernel};

fn coordinate() -> impl Strategy<Value = f64> {
    -1_000.0..1_000.0
}

fn point() -> impl Strategy<Value = Point> {
    (0u8..4, coordinate(), coordinate())
        .prop_map(|(category, x1, x2)| Point::new(f64::from(category), x1, x2))
}

fn centroid() -> impl Strategy<Value = Centroid> {
    (coordinate(), coordinate()).prop_map(|(x, y)| Centroid::new(x, y))
}

proptest! {
    #[test]
    fn distances_are_non_negative(
        points in prop::collection::vec(point(), 0..50),
        c1 in centroid(),
        c2 in centroid(),
    ) {
        let distances = squared_distances(&points, &c1, &c2);

        prop_assert_eq!(distances.len(), points.len());
        prop_assert!(distances.r1_sq.iter().all(|&r| r >= 0.0));
        prop_assert!(distances.r2_sq.iter().all(|&r| r >= 0.0));
    }

    #[test]
    fn distance_step_is_idempotent(
        points in prop::collection::vec(point(), 0..50),
        c1 in centroid(),
        c2 in centroid(),
    ) {
        prop_assert_eq!(
            squared_distances(&points, &c1, &c2),
            squared_distances(&points, &c1, &c2)
        );
    }

    #[test]
    fn features_lie_in_unit_interval(
        points in prop::collection::vec(point(), 1..50),
        c1 in centroid(),
        c2 in centroid(),
        sigma_sq in 1e-3..1e6f64,
    ) {
        let distances = squared_distances(&points, &c1, &c2);
        let features = rbf_features(&distances, sigma_sq).unwrap();

        // exp underflows to 0.0 for far points, so the lower bound is closed here
        for phi in features.phi1.iter().chain(features.phi2.iter()) {
            prop_assert!(*phi >= 0.0 && *phi <= 1.0, "phi out of range: {}", phi);
        }
    }

    #[test]
    fn kernel_is_one_only_at_zero(r_sq in 1e-6..100.0f64, sigma_sq in 0.1..100.0f64) {
        let kernel = GaussianKernel::new(sigma_sq).unwrap();

        prop_assert!((kernel.apply(0.0) - 1.0).abs() < f64::EPSILON);
        prop_assert!(kernel.apply(r_sq) < 1.0);
        prop_assert!(kernel.apply(r_sq) > 0.0);
    }

    #[test]
    fn partition_is_complete(points in prop::collection::vec(point(), 0..50)) {
        let dataset = Dataset::try_from(points.clone()).unwrap();
        let mut session = Session::new(dataset, ParameterForm::new("0,0", "1,1", "1"));
        session.calculate_r().unwrap();
        session.calculate_phi().unwrap();

        let [original, transformed] = scatter_plots(&session).unwrap();

        let light: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.category() == Some(Category::Light))
            .map(|p| (p.x1, p.x2))
            .collect();
        let dark = points.iter().filter(|p| p.category() == Some(Category::Dark)).count();
        let other = points.iter().filter(|p| p.category().is_none()).count();

        prop_assert_eq!(original.series(Category::Light), light.as_slice());
        prop_assert_eq!(original.series(Category::Dark).len(), dark);
        prop_assert_eq!(original.excluded, other);
        prop_assert_eq!(transformed.series(Category::Light).len(), light.len());
        prop_assert_eq!(transformed.series(Category::Dark).len(), dark);
    }
}
