use nalgebra::{Point3, Vector3};

/// An orthorhombic periodic box described by its three edge lengths.
///
/// Lengths are stored in Angstroms, the native distance unit of the engine's
/// trajectory format. An edge length of zero (or less) disables periodic
/// wrapping along that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    lengths: Vector3<f64>,
}

impl SimulationBox {
    /// Creates a box from its three edge lengths in Angstroms.
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self {
            lengths: Vector3::new(a, b, c),
        }
    }

    /// The edge lengths in Angstroms.
    pub fn lengths(&self) -> Vector3<f64> {
        self.lengths
    }

    /// Distance between two points under the minimum-image convention.
    ///
    /// Each displacement component is folded back into `[-L/2, L/2]` before
    /// taking the norm. Axes with a non-positive edge length are left
    /// unwrapped.
    pub fn minimum_image_distance(&self, p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
        let mut d = p1 - p2;
        for axis in 0..3 {
            let length = self.lengths[axis];
            if length > 0.0 {
                d[axis] -= length * (d[axis] / length).round();
            }
        }
        d.norm()
    }
}

/// One time-sampled snapshot of the system: a position per atom plus the
/// periodic box recorded alongside it.
///
/// Frames read from trajectory files without a stored unit cell carry
/// `unit_cell: None`; distances computed against such frames fall back to
/// plain Euclidean geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Atom positions in Angstroms, in topology order.
    pub positions: Vec<Point3<f64>>,
    /// The periodic box stored with this frame, if any.
    pub unit_cell: Option<SimulationBox>,
}

impl Frame {
    /// Number of atoms in this frame.
    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }
}
