pub mod backup;
pub mod data;
pub mod driver;
pub mod ledger;
pub mod log;
pub mod lookup;
pub mod report;
pub mod session;
pub mod status;
pub mod vehicle;
