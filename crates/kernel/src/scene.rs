use glam::Vec3;
use serde::{Deserialize, Serialize};
use viewport_common::Color;

use crate::class::ClassName;

/// Stable handle of an object in a [`Scene`]. Index into the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from the instance factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("class {0} is not creatable")]
    NotCreatable(String),
    #[error("cannot parent to {parent}")]
    InvalidParent { parent: ClassName },
    #[error("node {0} does not belong to this scene")]
    UnknownNode(NodeId),
}

/// Properties of a `Part`.
///
/// `size` is the full box extent; the renderer halves it. Nothing here is
/// validated: a zero size renders as degenerate faces and a transparency
/// outside `[0, 1]` flows straight into alpha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartProperties {
    pub anchored: bool,
    pub can_collide: bool,
    pub color: Color,
    pub transparency: f32,
    pub size: Vec3,
    pub position: Vec3,
    /// Degrees about X then Y. Z is stored but never applied.
    pub rotation: Vec3,
    /// Always zero at creation; not integrated.
    pub velocity: Vec3,
}

impl Default for PartProperties {
    fn default() -> Self {
        Self {
            anchored: true,
            can_collide: true,
            color: Color::default(),
            transparency: 0.0,
            size: Vec3::new(4.0, 2.0, 4.0),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }
}

/// Caller-supplied properties for `create_instance`. Each field that is
/// `None` falls back to its own default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PartOverrides {
    pub anchored: Option<bool>,
    pub can_collide: Option<bool>,
    pub color: Option<Color>,
    pub transparency: Option<f32>,
    pub size: Option<Vec3>,
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
}

impl PartOverrides {
    /// Merge over the defaults, field by field.
    pub fn resolve(self) -> PartProperties {
        let d = PartProperties::default();
        PartProperties {
            anchored: self.anchored.unwrap_or(d.anchored),
            can_collide: self.can_collide.unwrap_or(d.can_collide),
            color: self.color.unwrap_or(d.color),
            transparency: self.transparency.unwrap_or(d.transparency),
            size: self.size.unwrap_or(d.size),
            position: self.position.unwrap_or(d.position),
            rotation: self.rotation.unwrap_or(d.rotation),
            velocity: Vec3::ZERO,
        }
    }
}

/// Per-class payload of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Properties {
    None,
    Part(PartProperties),
}

/// A node in the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    class: ClassName,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    properties: Properties,
}

impl SceneObject {
    pub fn class(&self) -> ClassName {
        self.class
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn as_part(&self) -> Option<&PartProperties> {
        match &self.properties {
            Properties::Part(p) => Some(p),
            Properties::None => None,
        }
    }
}

/// A record of every mutation to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    Created { id: NodeId, class: ClassName },
    Parented { child: NodeId, parent: NodeId },
}

/// The scene tree: a `Game` root owning one `Workspace`, plus everything the
/// factory has created since.
///
/// Objects live in an arena and refer to each other by [`NodeId`]. Parents
/// own their children through the `children` list; the `parent` field is a
/// back-reference for traversal only. Nothing is ever removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
    root: NodeId,
    workspace: NodeId,
    #[serde(skip)]
    event_log: Vec<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let workspace = NodeId(1);
        let objects = vec![
            SceneObject {
                class: ClassName::Game,
                parent: None,
                children: vec![workspace],
                properties: Properties::None,
            },
            SceneObject {
                class: ClassName::Workspace,
                parent: Some(root),
                children: Vec::new(),
                properties: Properties::None,
            },
        ];
        Self {
            objects,
            root,
            workspace,
            event_log: Vec::new(),
        }
    }

    /// The `Game` root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `Workspace` under the root; its `Part` children are what gets drawn.
    pub fn workspace(&self) -> NodeId {
        self.workspace
    }

    /// Number of objects, including unparented ones.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(SceneObject::parent)
    }

    /// Children of `id` in creation order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(SceneObject::children).unwrap_or(&[])
    }

    pub fn part(&self, id: NodeId) -> Option<&PartProperties> {
        self.get(id).and_then(SceneObject::as_part)
    }

    /// Mutable access to a part's properties for host code.
    pub fn part_mut(&mut self, id: NodeId) -> Option<&mut PartProperties> {
        match self.objects.get_mut(id.index()).map(|o| &mut o.properties) {
            Some(Properties::Part(p)) => Some(p),
            _ => None,
        }
    }

    /// Parts directly under the workspace, in creation order.
    pub fn workspace_parts(&self) -> impl Iterator<Item = (NodeId, &PartProperties)> + '_ {
        self.children(self.workspace)
            .iter()
            .filter_map(|&id| self.part(id).map(|p| (id, p)))
    }

    /// Instantiate `class_name`, optionally under `parent`.
    ///
    /// Fails with `NotCreatable` for unknown or non-creatable classes and with
    /// `InvalidParent` when the parent's class is not movable. On failure the
    /// scene is left untouched.
    pub fn create_instance(
        &mut self,
        class_name: &str,
        properties: PartOverrides,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        let class = ClassName::from_name(class_name)
            .filter(|c| c.descriptor().creatable)
            .ok_or_else(|| SceneError::NotCreatable(class_name.to_string()))?;

        if let Some(parent) = parent {
            let parent_class = self
                .get(parent)
                .ok_or(SceneError::UnknownNode(parent))?
                .class;
            if !parent_class.descriptor().movable {
                tracing::debug!(%parent, %parent_class, "rejected parent");
                return Err(SceneError::InvalidParent {
                    parent: parent_class,
                });
            }
        }

        let props = match class {
            ClassName::Part => Properties::Part(properties.resolve()),
            ClassName::Game | ClassName::Workspace => Properties::None,
        };

        let id = NodeId(self.objects.len() as u32);
        self.objects.push(SceneObject {
            class,
            parent,
            children: Vec::new(),
            properties: props,
        });
        self.event_log.push(SceneEvent::Created { id, class });

        if let Some(parent) = parent {
            self.objects[parent.index()].children.push(id);
            self.event_log.push(SceneEvent::Parented { child: id, parent });
        }

        tracing::debug!(%id, %class, parent = ?parent, "created instance");
        Ok(id)
    }

    /// Read-only access to the mutation log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the mutation log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
