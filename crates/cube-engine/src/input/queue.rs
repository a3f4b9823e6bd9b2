use std::collections::HashSet;

/// Input event types the engine understands.
/// Generic, with no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// A queue of input events plus the set of keys currently held.
///
/// The host pushes events as they happen; the runner drains the events once
/// per frame. Held-key state survives the drain, so a frame that runs zero
/// ticks does not lose a press or release.
pub struct InputQueue {
    events: Vec<InputEvent>,
    held: HashSet<u32>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            held: HashSet::new(),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                self.held.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.held.remove(&key_code);
            }
        }
        self.events.push(event);
    }

    /// Whether the last event seen for `key_code` was a key-down.
    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    /// Forget all held keys (e.g. when the page loses focus).
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
