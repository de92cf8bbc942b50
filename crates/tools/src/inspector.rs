use std::collections::BTreeMap;
use std::fmt::Write;

use viewport_common::Color;
use viewport_kernel::{ClassName, NodeId, Scene};

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene for debugging and development UI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &Scene) -> SceneSummary {
        let mut by_class = BTreeMap::new();
        for class in ClassName::ALL {
            by_class.insert(class, 0);
        }
        let mut attached = 0;
        for i in 0..scene.len() as u32 {
            let Some(obj) = scene.get(NodeId(i)) else {
                continue;
            };
            *by_class.entry(obj.class()).or_insert(0) += 1;
            if obj.parent().is_some() {
                attached += 1;
            }
        }
        SceneSummary {
            objects: scene.len(),
            by_class,
            unparented: scene.len() - attached - 1,
            rendered_parts: scene.workspace_parts().count(),
            pending_events: scene.events().len(),
        }
    }

    /// Indented outline of the tree under the root. Unparented objects are
    /// not reachable and do not appear.
    pub fn tree(scene: &Scene) -> String {
        let mut out = String::new();
        let mut stack = vec![(scene.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(obj) = scene.get(id) else {
                continue;
            };
            let _ = writeln!(out, "{}{} {}", "  ".repeat(depth), obj.class(), id);
            for child in obj.children().iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }

    /// Details of a part, or `None` if `id` is not a part.
    pub fn inspect_part(scene: &Scene, id: NodeId) -> Option<PartInfo> {
        let part = scene.part(id)?;
        Some(PartInfo {
            id,
            parent: scene.parent(id),
            color: part.color.clone(),
            transparency: part.transparency,
            size: part.size.to_array(),
            position: part.position.to_array(),
            rotation: part.rotation.to_array(),
        })
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub objects: usize,
    pub by_class: BTreeMap<ClassName, usize>,
    /// Objects created without a parent (the root excluded).
    pub unparented: usize,
    /// Parts the renderer will visit.
    pub rendered_parts: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: objects={} parts={} rendered={} unparented={} pending_events={}",
            self.objects,
            self.by_class.get(&ClassName::Part).copied().unwrap_or(0),
            self.rendered_parts,
            self.unparented,
            self.pending_events
        )
    }
}

/// Detailed info about a single part.
#[derive(Debug, Clone)]
pub struct PartInfo {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub color: Color,
    pub transparency: f32,
    pub size: [f32; 3],
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl std::fmt::Display for PartInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Part {} pos=({:.2}, {:.2}, {:.2}) size=({:.2}, {:.2}, {:.2}) rot=({:.1}, {:.1}) color={} transparency={:.2}",
            self.id,
            self.position[0],
            self.position[1],
            self.position[2],
            self.size[0],
            self.size[1],
            self.size[2],
            self.rotation[0],
            self.rotation[1],
            self.color,
            self.transparency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use viewport_kernel::PartOverrides;

    #[test]
    fn summary_empty_scene() {
        let scene = Scene::new();
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.objects, 2);
        assert_eq!(summary.by_class[&ClassName::Game], 1);
        assert_eq!(summary.by_class[&ClassName::Workspace], 1);
        assert_eq!(summary.by_class[&ClassName::Part], 0);
        assert_eq!(summary.unparented, 0);
        assert_eq!(summary.rendered_parts, 0);
    }

    #[test]
    fn summary_with_parts() {
        let mut scene = Scene::new();
        let ws = scene.workspace();
        let a = scene
            .create_instance("Part", PartOverrides::default(), Some(ws))
            .unwrap();
        scene
            .create_instance("Part", PartOverrides::default(), Some(a))
            .unwrap();
        scene
            .create_instance("Part", PartOverrides::default(), None)
            .unwrap();

        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.objects, 5);
        assert_eq!(summary.by_class[&ClassName::Part], 3);
        assert_eq!(summary.rendered_parts, 1);
        assert_eq!(summary.unparented, 1);
        assert_eq!(summary.pending_events, 5); // 3 created + 2 parented
    }

    #[test]
    fn tree_outline_is_indented() {
        let mut scene = Scene::new();
        let ws = scene.workspace();
        let a = scene
            .create_instance("Part", PartOverrides::default(), Some(ws))
            .unwrap();
        scene
            .create_instance("Part", PartOverrides::default(), Some(a))
            .unwrap();
        let tree = SceneInspector::tree(&scene);
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(
            lines,
            vec!["Game #0", "  Workspace #1", "    Part #2", "      Part #3"]
        );
    }

    #[test]
    fn inspect_part_found() {
        let mut scene = Scene::new();
        let id = scene
            .create_instance(
                "Part",
                PartOverrides {
                    position: Some(Vec3::new(1.0, 2.0, 3.0)),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        let info = SceneInspector::inspect_part(&scene, id).unwrap();
        assert_eq!(info.position, [1.0, 2.0, 3.0]);
        assert_eq!(info.parent, None);
        assert!(format!("{info}").contains("pos=(1.00, 2.00, 3.00)"));
    }

    #[test]
    fn inspect_non_part_is_none() {
        let scene = Scene::new();
        assert!(SceneInspector::inspect_part(&scene, scene.root()).is_none());
        assert!(SceneInspector::inspect_part(&scene, NodeId(42)).is_none());
    }

    #[test]
    fn summary_display() {
        let scene = Scene::new();
        let s = format!("{}", SceneInspector::summary(&scene));
        assert!(s.contains("objects=2"));
        assert!(s.contains("parts=0"));
    }
}
