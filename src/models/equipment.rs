use serde::{Deserialize, Serialize};

/// How a piece of equipment was used on an entry.
///
/// Hauling units (dump trucks) log trucking hours, everything else logs
/// operated hours. The kind is decided once, when rows are ingested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquipmentUsage {
    Hauling { trucking_hours: Option<f64> },
    Operated { hours: Option<f64> },
}

impl EquipmentUsage {
    /// Operated hours, or None for hauling units.
    pub fn operated_hours(&self) -> Option<f64> {
        match self {
            EquipmentUsage::Operated { hours } => *hours,
            EquipmentUsage::Hauling { .. } => None,
        }
    }

    /// Trucking hours, or None for operated equipment.
    pub fn trucking_hours(&self) -> Option<f64> {
        match self {
            EquipmentUsage::Hauling { trucking_hours } => *trucking_hours,
            EquipmentUsage::Operated { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLine {
    pub entry_id: String,
    pub equipment_name: String,
    pub attachment: Option<String>,
    pub usage: EquipmentUsage,
    pub notes: Option<String>,
}

/// Equipment names that denote hauling units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaulingUnits(Vec<String>);

impl HaulingUnits {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, equipment_name: &str) -> bool {
        let name = equipment_name.trim();
        self.0.iter().any(|h| h.eq_ignore_ascii_case(name))
    }
}

impl Default for HaulingUnits {
    fn default() -> Self {
        Self::new(["Dump Truck"])
    }
}

/// Equipment row exactly as stored by the capture forms.
///
/// Both numeric columns exist in storage; only one is meaningful per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEquipmentRow {
    pub entry_id: String,
    pub equipment: String,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub trucking_hours: Option<f64>,
    #[serde(default)]
    pub trucking_notes: Option<String>,
}

impl RawEquipmentRow {
    /// Resolve the row into an [`EquipmentLine`].
    ///
    /// A listed hauling unit is always `Hauling`. For other names the
    /// populated column decides, so a row carrying only trucking hours is
    /// still read as hauling.
    pub fn ingest(self, hauling: &HaulingUnits) -> EquipmentLine {
        let is_hauling = hauling.contains(&self.equipment)
            || (self.hours.is_none() && self.trucking_hours.is_some());

        let (usage, notes) = if is_hauling {
            (
                EquipmentUsage::Hauling {
                    trucking_hours: self.trucking_hours,
                },
                non_blank(self.trucking_notes).or(non_blank(self.notes)),
            )
        } else {
            (
                EquipmentUsage::Operated { hours: self.hours },
                non_blank(self.notes).or(non_blank(self.trucking_notes)),
            )
        };

        EquipmentLine {
            entry_id: self.entry_id,
            equipment_name: self.equipment,
            attachment: non_blank(self.attachment).filter(|a| !a.eq_ignore_ascii_case("none")),
            usage,
            notes,
        }
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, hours: Option<f64>, trucking: Option<f64>) -> RawEquipmentRow {
        RawEquipmentRow {
            entry_id: "t1".into(),
            equipment: name.into(),
            hours,
            trucking_hours: trucking,
            ..Default::default()
        }
    }

    #[test]
    fn dump_truck_is_hauling() {
        let line = row("Dump Truck", None, Some(3.5)).ingest(&HaulingUnits::default());
        assert_eq!(
            line.usage,
            EquipmentUsage::Hauling {
                trucking_hours: Some(3.5)
            }
        );
        assert_eq!(line.usage.operated_hours(), None);
    }

    #[test]
    fn excavator_is_operated() {
        let line = row("Komatsu 210 (New)", Some(6.0), None).ingest(&HaulingUnits::default());
        assert_eq!(line.usage.operated_hours(), Some(6.0));
        assert_eq!(line.usage.trucking_hours(), None);
    }

    #[test]
    fn trucking_only_row_is_hauling_even_with_unknown_name() {
        let line = row("Rented Tandem", None, Some(2.0)).ingest(&HaulingUnits::default());
        assert_eq!(line.usage.trucking_hours(), Some(2.0));
    }

    #[test]
    fn hauling_notes_prefer_trucking_notes() {
        let mut r = row("dump truck", None, Some(1.0));
        r.notes = Some("  ".into());
        r.trucking_notes = Some("3 runs to pit".into());
        r.attachment = Some("None".into());
        let line = r.ingest(&HaulingUnits::default());
        assert_eq!(line.notes.as_deref(), Some("3 runs to pit"));
        assert_eq!(line.attachment, None);
    }
}
