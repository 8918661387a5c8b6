//! Accessibility reflection - settings, roles, and the accessible tree
//!
//! The catalogue is an accessibility-pattern reference, so every widget can
//! report its accessibility contract as data: a tree of [`AccessibleNode`]s
//! describing role, accessible name, description, and sequential-navigation
//! reachability. The pattern tests assert against this tree.

/// Accessibility settings detected from the environment
#[derive(Debug, Clone)]
pub struct AccessibilitySettings {
    /// Use high contrast colors
    pub high_contrast: bool,

    /// Reduce or disable animations
    pub prefer_reduced_motion: bool,

    /// Screen reader is active
    pub screen_reader_enabled: bool,
}

impl AccessibilitySettings {
    /// Create default accessibility settings
    pub fn new() -> Self {
        Self {
            high_contrast: false,
            prefer_reduced_motion: false,
            screen_reader_enabled: false,
        }
    }

    /// Detect accessibility settings from environment
    pub fn from_env() -> Self {
        Self {
            high_contrast: std::env::var("ACCESSIBILITY_HIGH_CONTRAST").is_ok(),
            prefer_reduced_motion: std::env::var("ACCESSIBILITY_REDUCED_MOTION").is_ok(),
            screen_reader_enabled: std::env::var("SCREEN_READER").is_ok(),
        }
    }
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessibility role for components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Composite grid with known dimensions
    Grid {
        row_count: usize,
        col_count: usize,
    },
    /// A grid row; `selected` marks the tuned channel row
    Row { selected: bool },
    ColumnHeader,
    RowHeader,
    GridCell,
    /// `pressed` is `Some` only for toggle buttons exposing their state
    Button { pressed: Option<bool> },
    Link,
    /// Modal dialogs must set `modal`
    Dialog { modal: bool },
    /// Polite live region (toast, carousel announcement)
    Status,
    Group,
    List,
    ListItem,
    /// Structural node with no semantics of its own (overlay backdrop)
    Presentation,
}

/// One node in a widget's accessible tree
///
/// The accessible name is a single self-contained string: it must make
/// sense without being read together with sibling text.
#[derive(Debug, Clone)]
pub struct AccessibleNode {
    pub role: Role,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Reachable via sequential (Tab) navigation right now
    pub tab_stop: bool,
    pub children: Vec<AccessibleNode>,
}

impl AccessibleNode {
    /// Create a node with a role and no name
    pub fn new(role: Role) -> Self {
        AccessibleNode {
            role,
            name: None,
            description: None,
            tab_stop: false,
            children: Vec::new(),
        }
    }

    /// Set the accessible name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the accessible description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark whether this node is a sequential-navigation stop
    pub fn with_tab_stop(mut self, tab_stop: bool) -> Self {
        self.tab_stop = tab_stop;
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: AccessibleNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes
    pub fn with_children(mut self, children: impl IntoIterator<Item = AccessibleNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Visit this node and all descendants, depth first
    pub fn walk(&self, visit: &mut impl FnMut(&AccessibleNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Count sequential-navigation stops in this subtree
    ///
    /// The roving model requires exactly one inside a composite widget.
    pub fn tab_stop_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if node.tab_stop {
                count += 1;
            }
        });
        count
    }

    /// Find the first descendant (or self) matching a predicate
    pub fn find(&self, predicate: impl Fn(&AccessibleNode) -> bool) -> Option<&AccessibleNode> {
        self.find_inner(&predicate)
    }

    fn find_inner(&self, predicate: &dyn Fn(&AccessibleNode) -> bool) -> Option<&AccessibleNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_inner(predicate))
    }
}
