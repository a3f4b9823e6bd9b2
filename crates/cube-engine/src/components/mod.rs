pub mod entity;
pub mod material;
