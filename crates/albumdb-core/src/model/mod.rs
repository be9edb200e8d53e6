pub mod album;
pub mod ids;

pub use album::{Album, InsertOutcome, NewAlbum};
pub use ids::AlbumId;
