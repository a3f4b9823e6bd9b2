use crate::api::types::EntityId;
use crate::components::material::Material;
use crate::core::body::BoxBody;

/// A box in the world: physics record plus an optional renderable handle.
/// The two halves share nothing but the `id` the host uses to track its mesh.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by role.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not rendered).
    pub active: bool,
    /// Physics state.
    pub body: BoxBody,
    /// Material (optional; entities without one are invisible).
    pub material: Option<Material>,
}

impl Entity {
    pub fn new(id: EntityId, body: BoxBody) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            body,
            material: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
}
