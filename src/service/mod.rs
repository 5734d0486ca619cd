pub mod ingest;

pub use ingest::{IngestOutcome, load_if_needed};
