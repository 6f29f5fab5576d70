use super::frame::Frame;

/// An ordered sequence of frames read from one trajectory file.
///
/// Immutable once loaded; a single analysis run owns the trajectory for its
/// whole lifetime and iterates the frames strictly in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    frames: Vec<Frame>,
    atom_count: usize,
}

impl Trajectory {
    /// Creates a trajectory from frames and the per-frame atom count.
    ///
    /// The reader that produced the frames is responsible for ensuring every
    /// frame holds exactly `atom_count` positions.
    pub fn new(frames: Vec<Frame>, atom_count: usize) -> Self {
        Self { frames, atom_count }
    }

    /// The frames, in file order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames in the trajectory.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of atoms per frame.
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }
}
