pub mod line_segment;
pub mod scalar;
pub mod vector;
