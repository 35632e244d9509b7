//! Application module: the explicit player state the runtime and the UI share.
//!
//! `App` (in `app::model`) owns the track list, playback state, slider values,
//! widget layout and any modal notice or prompt. `App::apply` turns a
//! `UiCommand` into state changes plus the `AudioCmd`s the audio thread must run.

mod command;
mod model;

pub use command::*;
pub use model::*;
