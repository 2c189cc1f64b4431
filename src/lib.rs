pub mod config;
pub mod error;
pub mod export;
pub mod invoice;
pub mod notify;
pub mod pdf;
pub mod render;
pub mod report;
pub mod store;
pub mod xlsx;

pub use config::Config;
pub use error::{ExportError, Result};
pub use export::{ExportedFile, Exporter, ReportRequest, TransactionKind};
pub use notify::{DispatchOutcome, DispatchRequest, Dispatcher, LifecycleEvent};
pub use render::{DocumentRenderer, ExportFormat};
pub use store::Dataset;
