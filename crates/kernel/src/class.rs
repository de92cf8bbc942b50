use serde::{Deserialize, Serialize};

/// The fixed set of scene classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassName {
    Game,
    Workspace,
    Part,
}

impl ClassName {
    pub const ALL: [ClassName; 3] = [ClassName::Game, ClassName::Workspace, ClassName::Part];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Game => "Game",
            Self::Workspace => "Workspace",
            Self::Part => "Part",
        }
    }

    /// Look up a class by its registry name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Capability flags of this class.
    pub fn descriptor(self) -> ClassDescriptor {
        match self {
            Self::Game => ClassDescriptor {
                creatable: false,
                deletable: false,
                movable: false,
            },
            Self::Workspace => ClassDescriptor {
                creatable: false,
                deletable: false,
                movable: true,
            },
            Self::Part => ClassDescriptor {
                creatable: true,
                deletable: true,
                movable: true,
            },
        }
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flags for a class.
///
/// `deletable` is carried for completeness; nothing removes objects yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// The factory may instantiate this class.
    pub creatable: bool,
    pub deletable: bool,
    /// Objects of this class may receive children through the factory.
    pub movable: bool,
}

/// Registry lookup by name. `None` for names outside the fixed class set.
pub fn class_descriptor(name: &str) -> Option<ClassDescriptor> {
    ClassName::from_name(name).map(ClassName::descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_classes() {
        for class in ClassName::ALL {
            assert_eq!(class_descriptor(class.as_str()), Some(class.descriptor()));
        }
    }

    #[test]
    fn lookup_unknown_class() {
        assert!(class_descriptor("Model").is_none());
        assert!(class_descriptor("part").is_none());
        assert!(class_descriptor("").is_none());
    }

    #[test]
    fn only_part_is_creatable() {
        let creatable: Vec<ClassName> = ClassName::ALL
            .into_iter()
            .filter(|c| c.descriptor().creatable)
            .collect();
        assert_eq!(creatable, vec![ClassName::Part]);
    }

    #[test]
    fn root_classes_are_not_deletable() {
        assert!(!ClassName::Game.descriptor().deletable);
        assert!(!ClassName::Workspace.descriptor().deletable);
        assert!(ClassName::Part.descriptor().deletable);
    }

    #[test]
    fn game_does_not_accept_children() {
        assert!(!ClassName::Game.descriptor().movable);
        assert!(ClassName::Workspace.descriptor().movable);
    }
}
