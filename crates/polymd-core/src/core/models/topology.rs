use nalgebra::Point3;

/// A single atom record from a topology file, kept in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The serial number as written in the file.
    pub serial: usize,
    /// The atom name (e.g. "CA", "N1").
    pub name: String,
    /// The residue name the atom belongs to (e.g. "PAA", "GTA").
    pub residue_name: String,
    /// The chain identifier column; a space when the file leaves it blank.
    pub chain_id: char,
    /// The residue sequence number.
    pub residue_seq: isize,
    /// The position recorded in the topology file, in Angstroms.
    pub position: Point3<f64>,
}

/// The static description of the simulated system: every atom record in the
/// order the engine wrote them.
///
/// The record order defines the atom indexing used throughout the analysis
/// layer; trajectory frames are expected to list positions in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    atoms: Vec<AtomRecord>,
}

impl Topology {
    /// Creates a topology from atom records in file order.
    pub fn new(atoms: Vec<AtomRecord>) -> Self {
        Self { atoms }
    }

    /// Number of atoms in the topology.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// All atom records, in file order.
    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    /// Indices of every atom whose residue name equals `name`, in file order.
    pub fn indices_with_residue_name(&self, name: &str) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| atom.residue_name == name)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(serial: usize, residue_name: &str) -> AtomRecord {
        AtomRecord {
            serial,
            name: "C1".to_string(),
            residue_name: residue_name.to_string(),
            chain_id: 'A',
            residue_seq: serial as isize,
            position: Point3::origin(),
        }
    }

    #[test]
    fn selection_by_residue_name_keeps_file_order() {
        let topology = Topology::new(vec![
            atom(1, "PAA"),
            atom(2, "GTA"),
            atom(3, "PAA"),
            atom(4, "GTA"),
        ]);
        assert_eq!(topology.indices_with_residue_name("PAA"), vec![0, 2]);
        assert_eq!(topology.indices_with_residue_name("GTA"), vec![1, 3]);
    }

    #[test]
    fn selection_with_unknown_name_is_empty() {
        let topology = Topology::new(vec![atom(1, "PAA")]);
        assert!(topology.indices_with_residue_name("XYZ").is_empty());
    }

    #[test]
    fn empty_topology_has_no_atoms() {
        let topology = Topology::default();
        assert_eq!(topology.atom_count(), 0);
        assert!(topology.atoms().is_empty());
    }
}
