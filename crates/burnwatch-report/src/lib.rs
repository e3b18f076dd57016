//! burnwatch-report: weekly text reports, JSON snapshots, and export.

pub mod export;
pub mod snapshot;
pub mod weekly;

pub use export::{default_file_name, export_report, write_report, ReportFormat};
pub use snapshot::WeeklySnapshot;
pub use weekly::ReportGenerator;
