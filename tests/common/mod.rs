pub mod fixtures;
pub mod tracker;
