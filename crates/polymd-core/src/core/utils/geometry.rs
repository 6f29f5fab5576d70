use crate::core::models::frame::SimulationBox;
use nalgebra::Point3;

/// Conversion factor between the trajectory's native Angstroms and the
/// nanometers used for contact cutoffs.
pub const ANGSTROMS_PER_NANOMETER: f64 = 10.0;

/// Converts a native-unit distance (Angstroms) to nanometers.
pub fn angstroms_to_nanometers(distance: f64) -> f64 {
    distance / ANGSTROMS_PER_NANOMETER
}

/// Distance between two points, honouring the minimum-image convention when a
/// periodic box is present.
pub fn pair_distance(p1: &Point3<f64>, p2: &Point3<f64>, cell: Option<&SimulationBox>) -> f64 {
    match cell {
        Some(cell) => cell.minimum_image_distance(p1, p2),
        None => (p1 - p2).norm(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_angstroms_is_one_nanometer() {
        assert_eq!(angstroms_to_nanometers(10.0), 1.0);
    }

    #[test]
    fn pair_distance_without_cell_is_euclidean() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 6.0, 8.0);
        assert_eq!(pair_distance(&p1, &p2, None), 10.0);
    }

    #[test]
    fn pair_distance_with_cell_uses_minimum_image() {
        let cell = SimulationBox::new(10.0, 10.0, 10.0);
        let p1 = Point3::new(0.5, 0.0, 0.0);
        let p2 = Point3::new(9.5, 0.0, 0.0);
        assert!((pair_distance(&p1, &p2, Some(&cell)) - 1.0).abs() < 1e-12);
    }
}
