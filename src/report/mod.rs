//! Report layout and pagination.
//!
//! Data flows one way: raw rows are aggregated, the assembler sequences
//! pages, tables and slips are laid out against a [`cursor::PageCursor`],
//! and everything ends up on a [`crate::render::Surface`].

pub mod aggregate;
pub mod assemble;
pub mod cursor;
pub mod detail;
pub mod entry;
pub mod filename;
pub mod format;
pub mod image;
pub mod payroll;
pub mod prefetch;
pub mod slip;
pub mod summary;
pub mod table;
pub mod text;
pub mod wrap;

pub use assemble::{CONTENT_TYPE, ReportDocument, ReportOptions, build_batch_report, build_entry_report};
pub use cursor::{PageCursor, PageLayout};
pub use table::{Align, Column, Overflow, Table, TableOutcome, TableStyle};
pub use wrap::{wrap, wrap_lines};
