/// Which host-side texture a box is drawn with.
/// The indices are game-defined; the host maps them to loaded textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureSlot {
    #[default]
    None,
    /// A static image texture.
    Image(u32),
    /// A texture fed from a playing video element.
    Video(u32),
}

impl TextureSlot {
    /// Wire encoding: (kind, index). Kind 0 = none, 1 = image, 2 = video.
    pub fn encode(self) -> (f32, f32) {
        match self {
            TextureSlot::None => (0.0, 0.0),
            TextureSlot::Image(i) => (1.0, i as f32),
            TextureSlot::Video(i) => (2.0, i as f32),
        }
    }
}

/// Material component: how the host should dress a box.
/// Entities without one are simulated but never drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Linear RGB in 0..1.
    pub color: [f32; 3],
    pub texture: TextureSlot,
    pub casts_shadow: bool,
    pub receives_shadow: bool,
}

impl Material {
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Build from a 0xRRGGBB hex value.
    pub fn from_hex(rgb: u32) -> Self {
        Self::new([
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        ])
    }

    pub fn with_texture(mut self, texture: TextureSlot) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_cast_shadow(mut self, enabled: bool) -> Self {
        self.casts_shadow = enabled;
        self
    }

    pub fn with_receive_shadow(mut self, enabled: bool) -> Self {
        self.receives_shadow = enabled;
        self
    }

    /// Shadow flags packed as bit 0 = casts, bit 1 = receives.
    pub fn shadow_bits(&self) -> u32 {
        (self.casts_shadow as u32) | ((self.receives_shadow as u32) << 1)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [0.0, 1.0, 0.0],
            texture: TextureSlot::None,
            casts_shadow: false,
            receives_shadow: false,
        }
    }
}
