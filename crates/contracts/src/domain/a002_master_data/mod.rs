pub mod aggregate;

pub use aggregate::{MasterDataFields, MasterDataRecord};
