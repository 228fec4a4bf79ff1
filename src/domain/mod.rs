pub mod capacity;
pub mod cell;
pub mod layout;
pub mod record;

pub use capacity::CapacityTable;
pub use record::CleanedRecord;
pub use record::OutputRecord;
