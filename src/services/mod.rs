pub mod color;
pub mod outfit;
pub mod weather;
