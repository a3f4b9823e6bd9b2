//! Shared frame buffer layout.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 12 floats]
//! [Instances: max_instances × 12 floats]
//! [Instance ids: max_instances × 1 float]
//! [Sounds: max_sounds × 1 float]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header on every pack.
//! TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::GameConfig;
use crate::api::types::{GameEvent, SoundEvent};
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_SOUNDS: usize = 4;
pub const HEADER_SOUND_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_GAME_OVER: usize = 8;
pub const HEADER_ALPHA: usize = 9;
// 10, 11 reserved

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance. Fixed wire format.
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per game event: kind, a, b, c. Fixed wire format.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Per-frame data handed to [`ProtocolLayout::pack`].
pub struct FrameView<'a> {
    pub frame: u64,
    pub render: &'a RenderBuffer,
    pub sounds: &'a [SoundEvent],
    pub events: &'a [GameEvent],
    pub game_over: bool,
    pub alpha: f32,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of instance id section in floats.
    pub id_data_floats: usize,
    /// Size of sound data section in floats.
    pub sound_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where instance ids begin.
    pub id_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_sounds: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let id_data_floats = max_instances;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let id_data_offset = instance_data_offset + instance_data_floats;
        let sound_data_offset = id_data_offset + id_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_sounds,
            max_events,
            instance_data_floats,
            id_data_floats,
            sound_data_floats,
            event_data_floats,
            instance_data_offset,
            id_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_sounds, config.max_events)
    }

    /// Allocate a zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Write one frame into `out`. Sections are truncated to capacity; the
    /// header counts report what was actually written.
    pub fn pack(&self, view: &FrameView<'_>, out: &mut [f32]) {
        debug_assert!(out.len() >= self.buffer_total_floats);

        let instances = &view.render.instances[..view.render.instances.len().min(self.max_instances)];
        let sounds = &view.sounds[..view.sounds.len().min(self.max_sounds)];
        let events = &view.events[..view.events.len().min(self.max_events)];

        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_FRAME_COUNTER] = view.frame as f32;
        out[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        out[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        out[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        out[HEADER_SOUND_COUNT] = sounds.len() as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = events.len() as f32;
        out[HEADER_GAME_OVER] = if view.game_over { 1.0 } else { 0.0 };
        out[HEADER_ALPHA] = view.alpha;

        let floats: &[f32] = bytemuck::cast_slice(instances);
        out[self.instance_data_offset..self.instance_data_offset + floats.len()]
            .copy_from_slice(floats);

        for (slot, id) in out[self.id_data_offset..]
            .iter_mut()
            .zip(view.render.ids.iter().take(instances.len()))
        {
            *slot = *id as f32;
        }

        for (slot, sound) in out[self.sound_data_offset..].iter_mut().zip(sounds) {
            *slot = sound.0 as f32;
        }

        let floats: &[f32] = bytemuck::cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + floats.len()]
            .copy_from_slice(floats);
    }
}
