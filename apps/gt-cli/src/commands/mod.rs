pub mod goal;
pub mod render;
