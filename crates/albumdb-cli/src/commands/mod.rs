pub mod add;
pub mod config;
pub mod list;
pub mod status;

pub use add::{run_add, EntryValues};
pub use list::list_albums;
pub use status::show_status;
