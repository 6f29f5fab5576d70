use crate::core::models::topology::Topology;
use tracing::warn;

/// How the two chemical groups were determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMethod {
    /// Both groups were selected by residue label.
    ByLabel,
    /// At least one label matched nothing; the atom list was split at its
    /// midpoint instead.
    MidpointFallback,
}

/// The resolved partition of atoms into the two chemical groups.
///
/// Groups hold topology indices, are disjoint, and need not cover all atoms
/// when resolved by label. The `method` tag records which path produced the
/// partition so callers (and tests) can assert on it instead of inferring it
/// from side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupResolution {
    pub method: ResolutionMethod,
    pub group_a: Vec<usize>,
    pub group_b: Vec<usize>,
}

impl GroupResolution {
    /// Maximum number of distinct cross-group pairs.
    pub fn pair_count(&self) -> usize {
        self.group_a.len() * self.group_b.len()
    }
}

/// Partitions the topology's atoms into two groups.
///
/// Primary strategy: select by residue label. When either label yields zero
/// atoms the full atom list is split deterministically at its midpoint, first
/// half to group A and second half to group B, and a warning is logged. Two
/// empty groups (an empty topology) are not an error; downstream contact
/// fractions degrade to zero.
pub fn resolve(topology: &Topology, label_a: &str, label_b: &str) -> GroupResolution {
    let group_a = topology.indices_with_residue_name(label_a);
    let group_b = topology.indices_with_residue_name(label_b);

    if group_a.is_empty() || group_b.is_empty() {
        warn!(
            label_a,
            label_b, "could not identify both residue groups by label, splitting atom list at its midpoint"
        );
        let n = topology.atom_count();
        let midpoint = n / 2;
        return GroupResolution {
            method: ResolutionMethod::MidpointFallback,
            group_a: (0..midpoint).collect(),
            group_b: (midpoint..n).collect(),
        };
    }

    GroupResolution {
        method: ResolutionMethod::ByLabel,
        group_a,
        group_b,
    }
}
