pub mod geometry;
pub mod path;
