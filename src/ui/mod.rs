//! Terminal rendering for the ballast binary

pub mod blocks;
pub mod console;
pub mod context;
pub mod error;
pub mod events;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod widgets;
