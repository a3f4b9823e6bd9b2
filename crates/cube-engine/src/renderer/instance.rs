use bytemuck::{Pod, Zeroable};

/// Per-box render data read by the host renderer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Center position in world space.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Full box size.
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Base color (linear RGB, 0..1).
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 0 = none, 1 = image, 2 = video.
    pub texture_kind: f32,
    /// Game-defined texture index within its kind.
    pub texture_index: f32,
    /// Bit 0 = casts shadow, bit 1 = receives shadow.
    pub flags: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer holding one instance per visible box, in scene order.
/// Instance `i` belongs to the entity whose ID is `ids[i]`.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    pub ids: Vec<u32>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.ids.clear();
    }

    /// Append an instance. Returns false (and drops it) once capacity is reached.
    pub fn push(&mut self, id: u32, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        self.ids.push(id);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for the host to read from WASM memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Raw pointer to the entity ID column.
    pub fn ids_ptr(&self) -> *const u32 {
        self.ids.as_ptr()
    }

    /// Instances viewed as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
