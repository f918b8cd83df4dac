//! Collection-scoped access to the record store.
//!
//! Each collection exposes the same small surface: `insert`, `update`,
//! `delete_by_id`, `select_all` and `get`. Reports additionally support
//! filtering (see [`reports::ReportFilter`]).

pub mod drivers;
pub mod reports;
pub mod vehicles;

/// Ordering by date used by report selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}
