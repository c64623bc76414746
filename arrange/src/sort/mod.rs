//! Column sorting.

mod engine;
mod remote;
mod table;

pub use engine::{SortEngine, SortOutcome};
pub use remote::{RemoteResolution, RemoteSource, RemoteTicket, SortRequest};
pub use table::{SortStatus, SortableTable};
