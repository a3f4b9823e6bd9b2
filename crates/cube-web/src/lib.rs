pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Expands to:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, key handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use cube_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// cube_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `cube_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_create() first.");
                f(runner)
            })
        }

        /// Build the runner without starting the game, so the host can
        /// call `game_load_config` before `game_init`.
        #[wasm_bindgen]
        pub fn game_create() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: created", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_load_config(json: &str) -> bool {
            with_runner(|r| r.load_config(json))
        }

        #[wasm_bindgen]
        pub fn game_init() {
            let created = RUNNER.with(|cell| cell.borrow().is_some());
            if !created {
                game_create();
            }
            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        /// Advance by `dt` seconds. Returns false once the game is over;
        /// the host should stop requesting animation frames.
        #[wasm_bindgen]
        pub fn game_tick(dt: f32) -> bool {
            with_runner(|r| r.tick(dt))
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        /// The page lost focus: key-ups will not arrive, so forget held keys.
        #[wasm_bindgen]
        pub fn game_blur() {
            with_runner(|r| r.blur());
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_ids_ptr() -> *const u32 {
            with_runner(|r| r.instance_ids_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_shared_buffer_ptr() -> *const f32 {
            with_runner(|r| r.shared_buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_count() -> f64 {
            with_runner(|r| r.frame_count() as f64)
        }

        #[wasm_bindgen]
        pub fn is_game_over() -> bool {
            with_runner(|r| r.is_halted())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
