use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub entry_id: String,
    pub material_name: String,
    /// Whole loads in practice, stored as a real.
    pub loads: f64,
    #[serde(default)]
    pub notes: Option<String>,
}
