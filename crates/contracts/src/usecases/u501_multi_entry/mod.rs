pub mod request;
pub mod response;

pub use request::MultiEntryRequest;
pub use response::{EntryResult, EntryStatus, MultiEntryResponse};
