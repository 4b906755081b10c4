pub mod flexible;
pub mod outcome;
pub mod value;

pub use flexible::FlexibleCell;
pub use outcome::{RejectReason, RowOutcome, SearchOutcome, SearchReport};
pub use value::ValueClassifier;
