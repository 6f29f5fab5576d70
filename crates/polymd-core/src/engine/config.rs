use crate::engine::error::AnalysisError;

/// Default contact cutoff in nanometers.
pub const DEFAULT_CUTOFF_NM: f64 = 0.6;

/// Default residue label selecting the polyallylamine group.
pub const DEFAULT_GROUP_A_LABEL: &str = "PAA";

/// Default residue label selecting the glutaraldehyde group.
pub const DEFAULT_GROUP_B_LABEL: &str = "GTA";

/// Parameters of one contact-analysis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    /// Distances strictly below this value (in nanometers) count as contacts.
    pub cutoff_nm: f64,
    /// Residue name selecting group A.
    pub group_a_label: String,
    /// Residue name selecting group B.
    pub group_b_label: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            cutoff_nm: DEFAULT_CUTOFF_NM,
            group_a_label: DEFAULT_GROUP_A_LABEL.to_string(),
            group_b_label: DEFAULT_GROUP_B_LABEL.to_string(),
        }
    }
}

impl ContactConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.cutoff_nm <= 0.0 {
            return Err(AnalysisError::NonPositiveCutoff(self.cutoff_nm));
        }
        Ok(())
    }
}
