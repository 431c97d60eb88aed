//! Grouped totals computed from the raw rows before layout.
//!
//! Non-finite numbers count as zero so a single malformed record cannot
//! poison a whole report. Blank keys are grouped under [`UNSPECIFIED`]
//! so that the groups of a breakdown always add up to the raw total.

use crate::models::{EquipmentLine, LaborEntry, MaterialLine};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const UNSPECIFIED: &str = "(unspecified)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTotal {
    pub key: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentTotal {
    pub name: String,
    pub hours: f64,
    pub trucking_hours: f64,
}

impl EquipmentTotal {
    pub fn combined(&self) -> f64 {
        self.hours + self.trucking_hours
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub entry_count: usize,
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub labor: f64,
    pub equipment: f64,
    pub trucking: f64,
}

pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

fn group_key(raw: &str) -> String {
    let k = raw.trim();
    if k.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        k.to_string()
    }
}

/// Descending by total, ties broken by key so output is deterministic.
fn by_total_desc(a: f64, b: f64, ka: &str, kb: &str) -> std::cmp::Ordering {
    b.total_cmp(&a).then_with(|| ka.cmp(kb))
}

pub fn totals(entries: &[LaborEntry], equipment: &[EquipmentLine]) -> ReportTotals {
    ReportTotals {
        labor: entries.iter().map(|e| finite_or_zero(e.total_hours)).sum(),
        equipment: equipment
            .iter()
            .map(|l| finite_or_zero(l.usage.operated_hours().unwrap_or(0.0)))
            .sum(),
        trucking: equipment
            .iter()
            .map(|l| finite_or_zero(l.usage.trucking_hours().unwrap_or(0.0)))
            .sum(),
    }
}

/// Labour hours per employee, sorted by name.
pub fn labor_by_employee(entries: &[LaborEntry]) -> Vec<GroupedTotal> {
    let mut map: BTreeMap<String, f64> = BTreeMap::new();
    for e in entries {
        *map.entry(group_key(&e.employee_name)).or_default() += finite_or_zero(e.total_hours);
    }
    map.into_iter()
        .map(|(key, total)| GroupedTotal { key, total })
        .collect()
}

/// Operated and trucking hours per equipment name, biggest combined first.
/// Groups where both sums are zero are dropped.
pub fn equipment_by_name(lines: &[EquipmentLine]) -> Vec<EquipmentTotal> {
    let mut map: HashMap<String, (f64, f64)> = HashMap::new();
    for l in lines {
        let slot = map.entry(group_key(&l.equipment_name)).or_default();
        slot.0 += finite_or_zero(l.usage.operated_hours().unwrap_or(0.0));
        slot.1 += finite_or_zero(l.usage.trucking_hours().unwrap_or(0.0));
    }

    let mut out: Vec<EquipmentTotal> = map
        .into_iter()
        .filter(|(_, (h, t))| *h != 0.0 || *t != 0.0)
        .map(|(name, (hours, trucking_hours))| EquipmentTotal {
            name,
            hours,
            trucking_hours,
        })
        .collect();
    out.sort_by(|a, b| by_total_desc(a.combined(), b.combined(), &a.name, &b.name));
    out
}

/// Loads per material name, biggest first. Zero groups are dropped.
pub fn loads_by_material(lines: &[MaterialLine]) -> Vec<GroupedTotal> {
    let mut map: HashMap<String, f64> = HashMap::new();
    for l in lines {
        *map.entry(group_key(&l.material_name)).or_default() += finite_or_zero(l.loads);
    }

    let mut out: Vec<GroupedTotal> = map
        .into_iter()
        .filter(|(_, total)| *total != 0.0)
        .map(|(key, total)| GroupedTotal { key, total })
        .collect();
    out.sort_by(|a, b| by_total_desc(a.total, b.total, &a.key, &b.key));
    out
}

/// Labour hours and entry count per work date, ascending.
pub fn labor_by_day(entries: &[LaborEntry]) -> Vec<DayTotal> {
    let mut map: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
    for e in entries {
        let slot = map.entry(e.work_date).or_default();
        slot.0 += 1;
        slot.1 += finite_or_zero(e.total_hours);
    }
    map.into_iter()
        .map(|(date, (entry_count, hours))| DayTotal {
            date,
            entry_count,
            hours,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquipmentUsage;

    fn entry(who: &str, day: u32, hours: f64) -> LaborEntry {
        LaborEntry {
            id: format!("{who}-{day}"),
            work_date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
            employee_name: who.into(),
            job_type: "Commercial".into(),
            job_description: String::new(),
            total_hours: hours,
            notes: String::new(),
        }
    }

    fn operated(name: &str, hours: f64) -> EquipmentLine {
        EquipmentLine {
            entry_id: "x".into(),
            equipment_name: name.into(),
            attachment: None,
            usage: EquipmentUsage::Operated { hours: Some(hours) },
            notes: None,
        }
    }

    fn hauling(name: &str, hours: f64) -> EquipmentLine {
        EquipmentLine {
            usage: EquipmentUsage::Hauling {
                trucking_hours: Some(hours),
            },
            ..operated(name, 0.0)
        }
    }

    fn material(name: &str, loads: f64) -> MaterialLine {
        MaterialLine {
            entry_id: "x".into(),
            material_name: name.into(),
            loads,
            notes: None,
        }
    }

    #[test]
    fn employees_sorted_by_name_and_nan_counts_as_zero() {
        let rows = labor_by_employee(&[
            entry("Willie", 1, 8.0),
            entry("Bryce", 1, f64::NAN),
            entry("Willie", 2, 2.5),
        ]);
        assert_eq!(
            rows,
            vec![
                GroupedTotal {
                    key: "Bryce".into(),
                    total: 0.0
                },
                GroupedTotal {
                    key: "Willie".into(),
                    total: 10.5
                },
            ]
        );
    }

    #[test]
    fn equipment_sums_both_kinds_and_sorts_by_combined() {
        let rows = equipment_by_name(&[
            operated("Kubota Mini", 3.0),
            hauling("Dump Truck", 5.0),
            operated("Paver", 0.0),
            operated("Kubota Mini", 1.0),
            hauling("Dump Truck", f64::INFINITY),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Dump Truck");
        assert_eq!((rows[0].hours, rows[0].trucking_hours), (0.0, 5.0));
        assert_eq!((rows[1].hours, rows[1].trucking_hours), (4.0, 0.0));
    }

    #[test]
    fn materials_sorted_desc_with_blank_names_kept() {
        let rows = loads_by_material(&[
            material("Topsoil", 2.0),
            material("Rip Rap", 5.0),
            material("  ", 1.0),
            material("Topsoil", 1.0),
        ]);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["Rip Rap", "Topsoil", UNSPECIFIED]);
    }

    #[test]
    fn days_ascending_with_counts() {
        let days = labor_by_day(&[entry("A", 3, 4.0), entry("B", 1, 8.0), entry("C", 3, 4.5)]);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.to_string(), "2025-07-01");
        assert_eq!((days[1].entry_count, days[1].hours), (2, 8.5));
    }

    #[test]
    fn overall_totals() {
        let t = totals(
            &[entry("A", 1, 8.0), entry("B", 1, 7.5)],
            &[operated("Paver", 2.0), hauling("Dump Truck", 3.0)],
        );
        assert_eq!(
            t,
            ReportTotals {
                labor: 15.5,
                equipment: 2.0,
                trucking: 3.0
            }
        );
    }
}
