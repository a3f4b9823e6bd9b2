pub mod body;
pub mod collision;
pub mod rng;
pub mod scene;
pub mod time;
