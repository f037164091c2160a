//! Data module - CSV loading and the ticket table

mod loader;
mod table;

pub use loader::{LoaderError, TicketLoader};
pub use table::TicketTable;
