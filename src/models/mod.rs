pub mod batch;
pub mod entry;
pub mod equipment;
pub mod filter;
pub mod material;
pub mod photo;

pub use batch::{DayGroup, ReportBatch};
pub use entry::LaborEntry;
pub use equipment::{EquipmentLine, EquipmentUsage, HaulingUnits, RawEquipmentRow};
pub use filter::{ReportFilter, ReportFilterBuilder, Selection};
pub use material::MaterialLine;
pub use photo::PhotoRef;
