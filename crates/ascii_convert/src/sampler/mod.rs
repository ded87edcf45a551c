pub mod grid;
pub mod resize;
