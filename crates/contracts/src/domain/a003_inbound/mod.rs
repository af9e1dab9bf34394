pub mod aggregate;
pub mod batch;
pub mod query;

pub use aggregate::{DuplicateWsnConflict, InboundEntry, InboundRecord, SingleEntryRequest};
pub use batch::BatchSummary;
pub use query::{InboundPage, InboundQuery};
