// Roster file ingestion and report emission

pub mod error;
pub mod html;
pub mod reader;
pub mod report;

pub use error::{IngestError, ReportError};
pub use html::write_html_report;
pub use reader::read_persons;
pub use report::write_csv_report;
