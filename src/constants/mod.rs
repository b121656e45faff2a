//! Gallery constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod input;
mod pan;
mod tile;
mod ui;

pub use input::*;
pub use pan::*;
pub use tile::*;
pub use ui::*;
