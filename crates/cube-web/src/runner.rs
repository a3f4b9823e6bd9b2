use cube_engine::{
    build_render_buffer, EngineContext, FixedTimestep, FrameView, Game, GameConfig,
    InputEvent, InputQueue, ProtocolLayout, RenderBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `cube-dodge`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    halted: bool,
    /// Game ticks actually run.
    ticks_run: u64,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
    /// Whole frame packed per `ProtocolLayout`.
    shared: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let sound_buffer = Vec::with_capacity(config.max_sounds);
        let shared = layout.allocate();

        Self {
            game,
            ctx: EngineContext::with_config(config.clone()),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            initialized: false,
            halted: false,
            ticks_run: 0,
            sound_buffer,
            shared,
        }
    }

    /// Initialize the game. Call once after construction (and after
    /// `load_config`, if the host overrides the config).
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Replace the runtime config from a JSON document.
    /// Rejected documents are logged and leave the current config in place.
    pub fn load_config(&mut self, json: &str) -> bool {
        match GameConfig::from_json(json) {
            Ok(config) => {
                self.apply_config(config);
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    fn apply_config(&mut self, config: GameConfig) {
        self.timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);
        self.layout = ProtocolLayout::from_config(&config);
        self.render_buffer = RenderBuffer::with_capacity(config.max_instances);
        self.shared = self.layout.allocate();
        log::info!(
            "config applied: dt={:.4}s, max_instances={}",
            config.fixed_dt,
            config.max_instances
        );
        self.ctx.config = config.clone();
        self.config = config;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Release every held key and drop partial frame time. Called when the
    /// page loses focus, since the matching key-ups never arrive.
    pub fn blur(&mut self) {
        self.input.release_all();
        self.timestep.reset();
        log::debug!("focus lost, input released");
    }

    /// Run one host frame. Returns `false` once the game is over, telling
    /// the host to stop scheduling frames.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.initialized {
            return false;
        }
        if self.halted {
            return false;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Fixed timestep accumulation
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.ticks_run += 1;
            if self.game.is_over() {
                self.halted = true;
                log::info!("game over after {} ticks, halting", self.ticks_run);
                break;
            }
        }

        // Drain input after update; held keys persist
        self.input.drain();

        self.publish();
        !self.halted
    }

    /// Rebuild the render, sound and shared buffers from the current state.
    fn publish(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);

        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.config.max_sounds) {
            match u8::try_from(sound.0) {
                Ok(id) => self.sound_buffer.push(id),
                Err(_) => log::warn!("sound cue {} does not fit the byte channel, skipped", sound.0),
            }
        }

        let view = FrameView {
            frame: self.ticks_run,
            render: &self.render_buffer,
            sounds: &self.ctx.sounds,
            events: &self.ctx.events,
            game_over: self.halted,
            alpha: self.timestep.alpha(),
        };
        self.layout.pack(&view, &mut self.shared);
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame_count(&self) -> u64 {
        self.ticks_run
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_ids_ptr(&self) -> *const u32 {
        self.render_buffer.ids_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn sound_events(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.config.max_events) as u32
    }

    pub fn shared_buffer(&self) -> &[f32] {
        &self.shared
    }

    pub fn shared_buffer_ptr(&self) -> *const f32 {
        self.shared.as_ptr()
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
