//! Domain records stored in the `vehicles`, `drivers` and `reports` tables.

pub mod condition;
pub mod driver;
pub mod report;
pub mod vehicle;

pub use condition::Condition;
pub use driver::Driver;
pub use report::TripReport;
pub use vehicle::Vehicle;
