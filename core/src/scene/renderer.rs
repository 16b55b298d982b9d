//! Scene components, and the material-slot capability of renderers.

use crate::material::MaterialHandle;

use super::NodeId;

/// Capability of components that draw with an ordered list of materials.
///
/// Slot `i` is used for sub-mesh `i`. A slot may be empty, and the same
/// material may appear in several slots.
pub trait HasMaterialSlots {
    /// Current slot array.
    fn material_slots(&self) -> &[Option<MaterialHandle>];

    /// Replaces the whole slot array.
    ///
    /// Slot arrays are always written wholesale: read them, modify the
    /// copy, write it back.
    fn set_material_slots(&mut self, slots: Vec<Option<MaterialHandle>>);

    /// Material in slot `index`, if the slot exists and is filled.
    fn material_slot(&self, index: usize) -> Option<MaterialHandle> {
        self.material_slots().get(index).copied().flatten()
    }
}

/// Static mesh renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRenderer {
    /// Mesh asset path.
    pub mesh: Option<String>,
    pub enabled: bool,
    materials: Vec<Option<MaterialHandle>>,
}

impl MeshRenderer {
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: Some(mesh.into()),
            enabled: true,
            materials: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_materials(mut self, materials: Vec<Option<MaterialHandle>>) -> Self {
        self.materials = materials;
        self
    }
}

impl HasMaterialSlots for MeshRenderer {
    fn material_slots(&self) -> &[Option<MaterialHandle>] {
        &self.materials
    }

    fn set_material_slots(&mut self, slots: Vec<Option<MaterialHandle>>) {
        self.materials = slots;
    }
}

/// Skinned mesh renderer driven by a bone hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinnedMeshRenderer {
    pub mesh: Option<String>,
    pub root_bone: Option<NodeId>,
    pub enabled: bool,
    materials: Vec<Option<MaterialHandle>>,
}

impl SkinnedMeshRenderer {
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: Some(mesh.into()),
            root_bone: None,
            enabled: true,
            materials: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_materials(mut self, materials: Vec<Option<MaterialHandle>>) -> Self {
        self.materials = materials;
        self
    }
}

impl HasMaterialSlots for SkinnedMeshRenderer {
    fn material_slots(&self) -> &[Option<MaterialHandle>] {
        &self.materials
    }

    fn set_material_slots(&mut self, slots: Vec<Option<MaterialHandle>>) {
        self.materials = slots;
    }
}

/// Point light. Carries no materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// A component attached to a [`SceneNode`](super::SceneNode).
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    MeshRenderer(MeshRenderer),
    SkinnedMeshRenderer(SkinnedMeshRenderer),
    Light(Light),
}

impl Component {
    /// Type name shown in logs and inspectors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Component::MeshRenderer(_) => "MeshRenderer",
            Component::SkinnedMeshRenderer(_) => "SkinnedMeshRenderer",
            Component::Light(_) => "Light",
        }
    }

    /// Material-slot view of this component, if it renders anything.
    pub fn as_renderer(&self) -> Option<&dyn HasMaterialSlots> {
        match self {
            Component::MeshRenderer(r) => Some(r),
            Component::SkinnedMeshRenderer(r) => Some(r),
            Component::Light(_) => None,
        }
    }

    pub fn as_renderer_mut(&mut self) -> Option<&mut dyn HasMaterialSlots> {
        match self {
            Component::MeshRenderer(r) => Some(r),
            Component::SkinnedMeshRenderer(r) => Some(r),
            Component::Light(_) => None,
        }
    }
}

impl From<MeshRenderer> for Component {
    fn from(renderer: MeshRenderer) -> Self {
        Component::MeshRenderer(renderer)
    }
}

impl From<SkinnedMeshRenderer> for Component {
    fn from(renderer: SkinnedMeshRenderer) -> Self {
        Component::SkinnedMeshRenderer(renderer)
    }
}

impl From<Light> for Component {
    fn from(light: Light) -> Self {
        Component::Light(light)
    }
}
