use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Convert one entity into a render instance, if it is visible.
pub fn render_instance(entity: &Entity) -> Option<RenderInstance> {
    if !entity.active {
        return None;
    }
    let material = entity.material.as_ref()?;

    let pos = entity.body.position;
    let size = entity.body.size();
    let (texture_kind, texture_index) = material.texture.encode();

    Some(RenderInstance {
        x: pos.x,
        y: pos.y,
        z: pos.z,
        width: size.x,
        height: size.y,
        depth: size.z,
        r: material.color[0],
        g: material.color[1],
        b: material.color[2],
        texture_kind,
        texture_index,
        flags: material.shadow_bits() as f32,
    })
}

/// Rebuild the render buffer from a set of entities, keeping scene order.
/// Returns the number of visible entities that did not fit.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
) -> usize {
    buffer.clear();

    let mut dropped = 0;
    for entity in entities {
        if let Some(instance) = render_instance(entity) {
            if !buffer.push(entity.id.0, instance) {
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        log::warn!(
            "render buffer full ({} instances), dropped {}",
            buffer.capacity(),
            dropped
        );
    }
    dropped
}
