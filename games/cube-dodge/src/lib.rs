use wasm_bindgen::prelude::*;
use cube_engine::*;

pub mod controls;
pub mod game;
pub mod spawner;

use game::DodgeGame;

cube_web::export_game!(DodgeGame, "cube-dodge");
