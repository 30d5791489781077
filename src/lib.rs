pub mod args;
pub mod engine;
pub mod errors;
pub mod ordered;
pub mod parser;
pub mod report;

pub use engine::{Gradebook, StudentRecord};
pub use errors::{IngestError, ReportError};
