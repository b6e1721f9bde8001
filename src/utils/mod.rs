pub mod fence;
pub mod ids;
