//! Playlist module: track metadata, the wrap-around track selector and the
//! folder scanner that feeds it.

mod model;
mod scan;

pub use model::{Track, TrackList};
pub use scan::load_source;
