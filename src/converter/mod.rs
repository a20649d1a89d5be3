mod entry;
mod shared;
mod table;

pub use entry::*;
pub use shared::*;
pub use table::*;
