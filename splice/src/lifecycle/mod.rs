//! Host lifecycle adapter.
//!
//! Turns a host's two-phase transform callbacks into exactly one dispatch
//! per class.

mod config;
mod plugin;
mod traits;

pub use config::{Phase, PluginConfig};
pub use plugin::PatchPlugin;
pub use traits::{GroupMeta, TransformPlugin};
