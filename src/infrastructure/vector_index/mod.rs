//! Vector index implementations

mod flat;
mod unloaded;

pub use flat::FlatIndex;
pub use unloaded::UnloadedIndex;
