//! Scene graph storage.
//!
//! Nodes live in an arena owned by [`Scene`] and refer to each other by
//! [`NodeId`]. Components are owned by their node and addressed by
//! [`ComponentId`]. Nodes are never removed, so ids stay valid for the
//! lifetime of the scene.

use std::fmt;

use thiserror::Error;

use super::renderer::Component;
use crate::abstract_editor::{EditActionError, EditActionResult, Editable, Recordable};

/// Index of a node inside its [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A component slot on a node: `(node, position in the node's component list)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    pub node: NodeId,
    pub index: u32,
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/component#{}", self.node, self.index)
    }
}

/// Scene lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("component not found: {0}")]
    ComponentNotFound(ComponentId),
}

impl From<SceneError> for EditActionError {
    fn from(err: SceneError) -> Self {
        EditActionError::TargetNotFound(err.to_string())
    }
}

/// A node in the scene tree.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// Inactive nodes are skipped at runtime but still belong to the scene.
    pub active: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    components: Vec<Component>,
}

impl SceneNode {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            active: true,
            parent,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

/// A scene: a forest of nodes with their components.
///
/// # Example
///
/// ```
/// use unshare_core::scene::{MeshRenderer, Scene};
///
/// let mut scene = Scene::new();
/// let root = scene.spawn("Crate");
/// let lid = scene.spawn_child(root, "Lid").unwrap();
/// scene.add_component(lid, MeshRenderer::new("meshes/lid.mesh")).unwrap();
///
/// assert_eq!(scene.descendants(root), vec![root, lid]);
/// assert_eq!(scene.node(lid).unwrap().parent(), Some(root));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root node.
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        self.push_node(SceneNode::new(name.into(), None))
    }

    /// Adds a node under `parent`.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let id = self.push_node(SceneNode::new(name.into(), Some(parent)));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    fn push_node(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(node.index())
    }

    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(node.index())
    }

    pub fn set_active(&mut self, node: NodeId, active: bool) -> Result<(), SceneError> {
        let node = self
            .node_mut(node)
            .ok_or(SceneError::NodeNotFound(node))?;
        node.active = active;
        Ok(())
    }

    /// Attaches a component to `node`.
    pub fn add_component(
        &mut self,
        node: NodeId,
        component: impl Into<Component>,
    ) -> Result<ComponentId, SceneError> {
        let entry = self
            .node_mut(node)
            .ok_or(SceneError::NodeNotFound(node))?;
        let index = entry.components.len() as u32;
        entry.components.push(component.into());
        Ok(ComponentId { node, index })
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.node(id.node)?.components.get(id.index as usize)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.node_mut(id.node)?
            .components
            .get_mut(id.index as usize)
    }

    /// Components of `node` with their ids, in attachment order.
    pub fn components(&self, node: NodeId) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.node(node)
            .map(|n| n.components.as_slice())
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(move |(index, component)| {
                (
                    ComponentId {
                        node,
                        index: index as u32,
                    },
                    component,
                )
            })
    }

    /// `root` and all of its descendants, depth-first pre-order.
    ///
    /// Children are visited in insertion order. Inactive nodes are included.
    /// Returns an empty list if `root` is not in the scene.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node);
            // Reverse so the first child is popped first.
            stack.extend(self.nodes[node.index()].children.iter().rev().copied());
        }
        out
    }
}

impl Editable for Scene {}

impl Recordable for Scene {
    type Key = ComponentId;
    type State = Component;

    fn capture(&self, key: ComponentId) -> Option<Component> {
        self.component(key).cloned()
    }

    fn restore(&mut self, key: ComponentId, state: Component) -> EditActionResult {
        let slot = self
            .component_mut(key)
            .ok_or(SceneError::ComponentNotFound(key))?;
        *slot = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialHandle;
    use crate::scene::{HasMaterialSlots, Light, MeshRenderer};

    fn tree() -> (Scene, [NodeId; 5]) {
        // Root
        // ├── A
        // │   ├── A1
        // │   └── A2
        // └── B
        let mut scene = Scene::new();
        let root = scene.spawn("Root");
        let a = scene.spawn_child(root, "A").unwrap();
        let b = scene.spawn_child(root, "B").unwrap();
        let a1 = scene.spawn_child(a, "A1").unwrap();
        let a2 = scene.spawn_child(a, "A2").unwrap();
        (scene, [root, a, b, a1, a2])
    }

    #[test]
    fn descendants_are_preorder() {
        let (scene, [root, a, b, a1, a2]) = tree();
        assert_eq!(scene.descendants(root), vec![root, a, a1, a2, b]);
        assert_eq!(scene.descendants(a), vec![a, a1, a2]);
        assert_eq!(scene.descendants(b), vec![b]);
    }

    #[test]
    fn descendants_include_inactive_nodes() {
        let (mut scene, [root, a, b, a1, a2]) = tree();
        scene.set_active(a, false).unwrap();
        assert_eq!(scene.descendants(root), vec![root, a, a1, a2, b]);
    }

    #[test]
    fn descendants_of_unknown_node_is_empty() {
        let (scene, _) = tree();
        assert!(scene.descendants(NodeId(99)).is_empty());
    }

    #[test]
    fn spawn_child_of_unknown_parent_fails() {
        let mut scene = Scene::new();
        assert_eq!(
            scene.spawn_child(NodeId(3), "Orphan"),
            Err(SceneError::NodeNotFound(NodeId(3)))
        );
    }

    #[test]
    fn children_keep_insertion_order() {
        let (scene, [root, a, b, a1, a2]) = tree();
        assert_eq!(scene.node(root).unwrap().children(), &[a, b]);
        assert_eq!(scene.node(a).unwrap().children(), &[a1, a2]);
        assert_eq!(scene.node(a1).unwrap().parent(), Some(a));
        assert_eq!(scene.node(root).unwrap().parent(), None);
    }

    #[test]
    fn components_are_addressable() {
        let (mut scene, [root, ..]) = tree();
        let light = scene.add_component(root, Light::default()).unwrap();
        let mesh = scene
            .add_component(root, MeshRenderer::new("meshes/box.mesh"))
            .unwrap();
        assert_eq!(light.index, 0);
        assert_eq!(mesh.index, 1);

        let kinds: Vec<_> = scene
            .components(root)
            .map(|(id, c)| (id.index, c.kind_name()))
            .collect();
        assert_eq!(kinds, vec![(0, "Light"), (1, "MeshRenderer")]);
        assert!(scene.components(NodeId(42)).next().is_none());
    }

    #[test]
    fn capture_and_restore_component() {
        let (mut scene, [root, ..]) = tree();
        let material = Some(MaterialHandle::from_raw(7));
        let id = scene
            .add_component(
                root,
                MeshRenderer::new("meshes/box.mesh").with_materials(vec![material]),
            )
            .unwrap();

        let before = scene.capture(id).unwrap();
        scene
            .component_mut(id)
            .and_then(Component::as_renderer_mut)
            .unwrap()
            .set_material_slots(vec![None]);
        scene.restore(id, before).unwrap();

        let slots = scene.component(id).unwrap().as_renderer().unwrap().material_slots();
        assert_eq!(slots, &[material]);
    }

    #[test]
    fn restore_missing_component_fails() {
        let (mut scene, [root, ..]) = tree();
        let missing = ComponentId {
            node: root,
            index: 4,
        };
        let err = scene
            .restore(missing, Component::Light(Light::default()))
            .unwrap_err();
        assert!(matches!(err, EditActionError::TargetNotFound(_)));
    }
}
