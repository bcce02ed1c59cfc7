//! Client-side services for the A4 Stock Tracker

pub mod entry;
pub mod export;
pub mod reference;
pub mod report;

pub use entry::{EntryDraft, EntryRecorder};
pub use export::ExportService;
pub use reference::ReferenceData;
pub use report::{render_table, ReportService, ReportView};
