use crate::sim::error::SimError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults applied by the engine to every chain entry in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainDefaults {
    /// How the engine models the chains; polymers are treated protein-like.
    pub molecule_type: String,
    pub restraint: bool,
    /// Which termini carry charges ("both", "N", "C", or "none").
    pub charge_termini: String,
    pub periodic: bool,
}

impl Default for ChainDefaults {
    fn default() -> Self {
        Self {
            molecule_type: "protein".to_string(),
            restraint: false,
            charge_termini: "both".to_string(),
            periodic: true,
        }
    }
}

/// One chain species in the composition manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSpec {
    /// Number of molecules of this species placed in the box.
    pub nmol: u32,
    /// Residue-definition table (CSV) the engine parameterizes from.
    pub fresidues: PathBuf,
    /// Monomer sequence (FASTA) defining one chain.
    pub ffasta: PathBuf,
}

/// The composition manifest document consumed by the external engine.
///
/// Maps chain names to molecule counts and input files. Chain entries are
/// kept sorted by name so the serialized document is deterministic; mixed
/// compositions are built by adding one entry per species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentsSpec {
    pub defaults: ChainDefaults,
    pub system: BTreeMap<String, ChainSpec>,
}

impl ComponentsSpec {
    pub fn new(defaults: ChainDefaults) -> Self {
        Self {
            defaults,
            system: BTreeMap::new(),
        }
    }

    pub fn with_chain(mut self, name: impl Into<String>, spec: ChainSpec) -> Self {
        self.system.insert(name.into(), spec);
        self
    }

    /// Serializes the manifest into `dir/file_name` and returns the path.
    pub fn write(&self, dir: &Path, file_name: &str) -> Result<PathBuf, SimError> {
        let body = toml::to_string_pretty(self).map_err(|source| SimError::Serialize {
            document: "components",
            source,
        })?;
        let path = dir.join(file_name);
        fs::write(&path, body)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(nmol: u32, fasta: &str) -> ChainSpec {
        ChainSpec {
            nmol,
            fresidues: PathBuf::from("input/polymer_residues.csv"),
            ffasta: PathBuf::from(fasta),
        }
    }

    #[test]
    fn defaults_describe_protein_like_periodic_chains() {
        let defaults = ChainDefaults::default();
        assert_eq!(defaults.molecule_type, "protein");
        assert_eq!(defaults.charge_termini, "both");
        assert!(defaults.periodic);
        assert!(!defaults.restraint);
    }

    #[test]
    fn mixed_manifest_holds_one_entry_per_species() {
        let spec = ComponentsSpec::new(ChainDefaults::default())
            .with_chain("polyallylamine_chain", chain(5, "input/polyallylamine.fasta"))
            .with_chain("glutaraldehyde_chain", chain(5, "input/glutaraldehyde.fasta"));

        assert_eq!(spec.system.len(), 2);
        assert_eq!(spec.system["polyallylamine_chain"].nmol, 5);
        assert_eq!(spec.system["glutaraldehyde_chain"].nmol, 5);
    }

    #[test]
    fn manifest_round_trips_through_toml() {
        let spec = ComponentsSpec::new(ChainDefaults::default())
            .with_chain("polyallylamine_chain", chain(10, "input/polyallylamine.fasta"));
        let body = toml::to_string_pretty(&spec).unwrap();
        assert!(body.contains("[system.polyallylamine_chain]"));

        let parsed: ComponentsSpec = toml::from_str(&body).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn write_places_the_manifest_in_the_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ComponentsSpec::new(ChainDefaults::default())
            .with_chain("polyallylamine_chain", chain(10, "input/polyallylamine.fasta"));
        let path = spec.write(dir.path(), "components.toml").unwrap();
        let body = fs::read_to_string(path).unwrap();
        assert!(body.contains("nmol = 10"));
    }
}
