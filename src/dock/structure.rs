//! Saving and restoring the shape of a layout
//!
//! A `Structure` is a copy of the tree without panels or bounds, keyed by
//! each control's persistence id. Restoring one re-uses the live control
//! nodes whose ids match, so their `NodeId`s, panels and delegates survive.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::panel::Panel;

use super::control::{DockControl, DockStyle};
use super::splitter::{DockSplitter, SplitterStyle};
use super::tree::{DockTree, NodeId, NodeKind};

/// Persisted layout node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Structure {
    Section(SectionStructure),
    Region(RegionStructure),
    Control(ControlStructure),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionStructure {
    #[serde(default = "default_true")]
    pub is_row: bool,
    #[serde(default = "unset")]
    pub width: i32,
    #[serde(default = "unset")]
    pub height: i32,
    /// Remembered splitter positions, by splitter index
    #[serde(default)]
    pub splitters: Vec<Option<Rect>>,
    #[serde(default)]
    pub contents: Vec<Structure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionStructure {
    #[serde(default)]
    pub active: Option<usize>,
    #[serde(default = "unset")]
    pub width: i32,
    #[serde(default = "unset")]
    pub height: i32,
    #[serde(default)]
    pub contents: Vec<Structure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStructure {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_name: bool,
    #[serde(default)]
    pub style: DockStyle,
    #[serde(default)]
    pub user_style: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub closeable: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default = "unset")]
    pub width: i32,
    #[serde(default = "unset")]
    pub height: i32,
}

fn default_true() -> bool {
    true
}

fn unset() -> i32 {
    -1
}

impl Default for Structure {
    fn default() -> Self {
        Structure::Section(SectionStructure {
            is_row: true,
            width: -1,
            height: -1,
            ..Default::default()
        })
    }
}

impl Structure {
    /// Persistence ids of every control, depth first
    pub fn control_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Structure::Control(c) => out.push(&c.id),
            Structure::Region(r) => r.contents.iter().for_each(|s| s.collect_ids(out)),
            Structure::Section(s) => s.contents.iter().for_each(|s| s.collect_ids(out)),
        }
    }

    /// Read a structure saved with `save`
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read layout from {}: {}", path.display(), e))?;
        let structure = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse layout at {}: {}", path.display(), e))?;
        tracing::info!("Loaded layout from {}", path.display());
        Ok(structure)
    }

    /// Write the structure as YAML, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create layout directory: {}", e))?;
        }
        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize layout: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write layout to {}: {}", path.display(), e))?;
        tracing::info!("Saved layout to {}", path.display());
        Ok(())
    }
}

/// What happens to live controls a restored structure does not mention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrasPolicy {
    /// Append them as a new top-level region
    #[default]
    AppendRegion,
    /// Append them as a hidden top-level region
    Hide,
}

/// Application hooks consulted while restoring a structure
pub trait StructureResolver {
    /// Supply a panel for a saved control id with no live control
    fn resolve_id(&mut self, _id: &str) -> Option<Box<dyn Panel>> {
        None
    }

    /// Decide what to do with live controls missing from the structure
    fn resolve_extras(&mut self, _tree: &DockTree, _extras: &[NodeId]) -> ExtrasPolicy {
        ExtrasPolicy::Hide
    }
}

/// Bookkeeping while building the restored tree
struct Restore {
    live: HashMap<String, NodeId>,
    claimed: HashSet<String>,
    /// Placeholders built for ids already claimed earlier in the layout
    duplicates: Vec<(NodeId, String)>,
    unresolved: Vec<(NodeId, String)>,
}

impl DockTree {
    /// Snapshot of the current layout
    pub fn get_structure(&self) -> Structure {
        self.structure_of(self.root()).unwrap_or_default()
    }

    fn structure_of(&self, id: NodeId) -> Option<Structure> {
        let node = self.get(id)?;
        let children = || {
            node.contents()
                .iter()
                .filter_map(|c| self.structure_of(*c))
                .collect()
        };
        Some(match &node.kind {
            NodeKind::Section(s) => Structure::Section(SectionStructure {
                is_row: s.is_row,
                width: node.width,
                height: node.height,
                splitters: s.splitters.iter().map(|sp| sp.last_bounds).collect(),
                contents: children(),
            }),
            NodeKind::Region(r) => Structure::Region(RegionStructure {
                active: r.active,
                width: node.width,
                height: node.height,
                contents: children(),
            }),
            NodeKind::Control(c) => Structure::Control(ControlStructure {
                id: c.id.clone(),
                name: c.name.clone(),
                user_name: c.user_name,
                style: c.style,
                user_style: c.user_style,
                visible: c.visible,
                locked: c.locked,
                closeable: c.closeable,
                resizable: c.resizable,
                width: node.width,
                height: node.height,
            }),
        })
    }

    /// Replace the layout with `structure`, re-using live controls by id.
    ///
    /// Repeated ids after the first are dropped. Ids with no live control go
    /// to the resolver and are dropped when it has no panel for them. Live
    /// controls the structure does not mention are appended as a new region,
    /// hidden when the policy (the resolver's, else `policy`) says so.
    pub fn apply_structure(
        &mut self,
        structure: &Structure,
        mut resolver: Option<&mut dyn StructureResolver>,
        policy: ExtrasPolicy,
    ) {
        let live_controls = self.get_controls(self.root(), false);
        let mut restore = Restore {
            live: live_controls
                .iter()
                .filter_map(|id| self.control(*id).map(|c| (c.id.clone(), *id)))
                .collect(),
            claimed: HashSet::new(),
            duplicates: Vec::new(),
            unresolved: Vec::new(),
        };

        let built = self.build_structure(structure, &mut restore, true);
        let top = if self.section(built).is_some() {
            built
        } else {
            let wrapped = if self.control(built).is_some() {
                self.new_region(vec![built])
            } else {
                built
            };
            self.new_section(true, vec![wrapped])
        };

        for (placeholder, id) in std::mem::take(&mut restore.duplicates) {
            tracing::warn!(
                "Saved layout names control '{}' more than once; dropping the repeat",
                id
            );
            self.discard(placeholder);
        }
        for (placeholder, id) in std::mem::take(&mut restore.unresolved) {
            let panel = resolver.as_deref_mut().and_then(|r| r.resolve_id(&id));
            match (panel, self.control_mut(placeholder)) {
                (Some(panel), Some(control)) => {
                    control.panel = Some(panel);
                    tracing::debug!("Resolved saved control '{}'", id);
                }
                _ => {
                    tracing::debug!("Dropping unknown saved control '{}'", id);
                    self.discard(placeholder);
                }
            }
        }

        let extras: Vec<NodeId> = live_controls
            .into_iter()
            .filter(|id| {
                self.control(*id)
                    .is_some_and(|c| !restore.claimed.contains(&c.id))
            })
            .collect();
        if !extras.is_empty() {
            let policy = match resolver.as_deref_mut() {
                Some(r) => r.resolve_extras(self, &extras),
                None => policy,
            };
            tracing::debug!("{} live controls not in layout: {:?}", extras.len(), policy);
            if policy == ExtrasPolicy::Hide {
                for id in &extras {
                    if let Some(control) = self.control_mut(*id) {
                        control.visible = false;
                    }
                }
            }
            let region = self.new_region(extras);
            self.update_active(region, None);
            let len = self.contents(top).len();
            self.insert_child(top, len, region);
            self.contents_changed(top);
        }

        self.set_root(top);
        self.collect_garbage();
        self.request_layout();
        tracing::debug!("Restored layout:\n{}", self.dump());
    }

    fn build_structure(&mut self, s: &Structure, restore: &mut Restore, top: bool) -> NodeId {
        match s {
            Structure::Control(c) => self.build_control(c, restore),
            Structure::Region(r) => {
                let children: Vec<NodeId> = r
                    .contents
                    .iter()
                    .map(|c| self.build_structure(c, restore, false))
                    .collect();
                let len = children.len();
                let id = self.new_region(children);
                let active = r.active.filter(|a| *a < len);
                if active.is_none() {
                    self.update_active(id, None);
                } else if let Some(region) = self.region_mut(id) {
                    region.active = active;
                }
                self.set_saved_size(id, r.width, r.height);
                id
            }
            Structure::Section(sec) => {
                let children: Vec<NodeId> = sec
                    .contents
                    .iter()
                    .map(|c| {
                        let child = self.build_structure(c, restore, false);
                        if self.control(child).is_some() {
                            self.new_region(vec![child])
                        } else {
                            child
                        }
                    })
                    .collect();
                let id = self.new_section(sec.is_row, children);
                let style = if sec.is_row {
                    SplitterStyle::Vertical
                } else {
                    SplitterStyle::Horizontal
                };
                if let Some(section) = self.section_mut(id) {
                    section.splitters = sec
                        .splitters
                        .iter()
                        .enumerate()
                        .map(|(i, last)| {
                            let mut sp = DockSplitter::new(i, style, Rect::ZERO);
                            sp.last_bounds = *last;
                            sp
                        })
                        .collect();
                }
                if !top {
                    self.set_saved_size(id, sec.width, sec.height);
                }
                id
            }
        }
    }

    fn build_control(&mut self, c: &ControlStructure, restore: &mut Restore) -> NodeId {
        let live = restore.live.get(&c.id).copied();
        let first = restore.claimed.insert(c.id.clone());
        match live {
            Some(id) if first => {
                if let Some(control) = self.control_mut(id) {
                    control.visible = c.visible;
                    control.locked = c.locked;
                    control.user_name = c.user_name;
                    control.user_style = c.user_style;
                    if c.user_name {
                        control.name = c.name.clone();
                    }
                    if c.user_style {
                        control.style = c.style;
                    }
                }
                self.set_saved_size(id, c.width, c.height);
                id
            }
            _ => {
                let mut placeholder = DockControl::new(c.id.clone(), c.name.clone())
                    .with_style(c.style)
                    .with_visible(c.visible)
                    .with_locked(c.locked)
                    .with_closeable(c.closeable)
                    .with_resizable(c.resizable);
                placeholder.user_name = c.user_name;
                placeholder.user_style = c.user_style;
                let id = self.insert_control(placeholder);
                self.set_saved_size(id, c.width, c.height);
                if first {
                    restore.unresolved.push((id, c.id.clone()));
                } else {
                    restore.duplicates.push((id, c.id.clone()));
                }
                id
            }
        }
    }

    fn set_saved_size(&mut self, id: NodeId, width: i32, height: i32) {
        if let Some(node) = self.get_mut(id) {
            node.width = width;
            node.height = height;
        }
    }

    /// Remove a node from its parent (collapsing as usual) and free it
    fn discard(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.remove(parent, id);
        }
        self.free(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    struct Fixed(i32, i32);

    impl Panel for Fixed {
        fn min_size(&self) -> Size {
            Size::new(self.0, self.1)
        }
        fn set_bounds(&mut self, _bounds: Rect) {}
        fn set_visible(&mut self, _visible: bool) {}
    }

    fn control(id: &str) -> ControlStructure {
        ControlStructure {
            id: id.to_string(),
            name: id.to_uppercase(),
            user_name: false,
            style: DockStyle::Horizontal,
            user_style: false,
            visible: true,
            locked: false,
            closeable: false,
            resizable: true,
            width: -1,
            height: -1,
        }
    }

    fn region(ids: &[&str]) -> Structure {
        Structure::Region(RegionStructure {
            active: Some(0),
            width: -1,
            height: -1,
            contents: ids.iter().map(|id| Structure::Control(control(id))).collect(),
        })
    }

    fn row(contents: Vec<Structure>) -> Structure {
        Structure::Section(SectionStructure {
            is_row: true,
            width: -1,
            height: -1,
            splitters: Vec::new(),
            contents,
        })
    }

    fn live_tree(ids: &[&str]) -> (DockTree, Vec<NodeId>) {
        let mut tree = DockTree::new();
        let controls: Vec<NodeId> = ids
            .iter()
            .map(|id| {
                tree.insert_control(
                    DockControl::new(*id, id.to_uppercase()).with_panel(Fixed(50, 50)),
                )
            })
            .collect();
        let regions: Vec<NodeId> = controls.iter().map(|c| tree.new_region(vec![*c])).collect();
        let root = tree.root();
        tree.set_group_contents(root, regions);
        (tree, controls)
    }

    #[test]
    fn test_live_controls_keep_their_ids() {
        let (mut tree, controls) = live_tree(&["a", "b"]);
        tree.apply_structure(&row(vec![region(&["b", "a"])]), None, ExtrasPolicy::AppendRegion);
        let root = tree.root();
        let regions = tree.contents(root);
        assert_eq!(regions.len(), 1);
        assert_eq!(tree.contents(regions[0]), vec![controls[1], controls[0]]);
        assert!(tree.has_panel(controls[0]));
    }

    #[test]
    fn test_duplicates_and_unknown_ids_are_dropped() {
        let (mut tree, controls) = live_tree(&["a"]);
        let saved = row(vec![region(&["a", "ghost"]), region(&["a"])]);
        tree.apply_structure(&saved, None, ExtrasPolicy::AppendRegion);
        let root = tree.root();
        assert_eq!(tree.get_controls(root, false), vec![controls[0]]);
        assert!(tree.find_control("ghost").is_none());
    }

    #[test]
    fn test_repeated_id_keeps_first_position() {
        let (mut tree, controls) = live_tree(&["a", "b"]);
        let saved = row(vec![region(&["b"]), region(&["a"]), region(&["b"])]);
        tree.apply_structure(&saved, None, ExtrasPolicy::AppendRegion);
        let root = tree.root();
        assert_eq!(tree.get_controls(root, false), vec![controls[1], controls[0]]);
        // The region that only held the repeat is gone
        assert_eq!(tree.contents(root).len(), 2);
    }

    struct Provides;

    impl StructureResolver for Provides {
        fn resolve_id(&mut self, id: &str) -> Option<Box<dyn Panel>> {
            (id == "ghost").then(|| Box::new(Fixed(10, 10)) as Box<dyn Panel>)
        }
    }

    #[test]
    fn test_resolver_supplies_missing_panels() {
        let (mut tree, _) = live_tree(&["a"]);
        let saved = row(vec![region(&["a", "ghost"])]);
        tree.apply_structure(&saved, Some(&mut Provides), ExtrasPolicy::AppendRegion);
        let ghost = tree.find_control("ghost");
        assert!(ghost.is_some_and(|g| tree.has_panel(g)));
    }

    #[test]
    fn test_extras_follow_policy() {
        let (mut tree, controls) = live_tree(&["a", "b"]);
        tree.apply_structure(&row(vec![region(&["a"])]), None, ExtrasPolicy::AppendRegion);
        let root = tree.root();
        assert_eq!(tree.contents(root).len(), 2);
        assert!(tree.is_visible(controls[1]));

        tree.apply_structure(&row(vec![region(&["a"])]), Some(&mut Provides), ExtrasPolicy::AppendRegion);
        let root = tree.root();
        assert_eq!(tree.contents(root).len(), 2);
        assert!(!tree.is_visible(controls[1]));
    }

    #[test]
    fn test_user_name_survives_restore() {
        let (mut tree, controls) = live_tree(&["a"]);
        let mut renamed = control("a");
        renamed.name = "Mine".to_string();
        renamed.user_name = true;
        let saved = row(vec![Structure::Region(RegionStructure {
            active: Some(0),
            width: -1,
            height: -1,
            contents: vec![Structure::Control(renamed)],
        })]);
        tree.apply_structure(&saved, None, ExtrasPolicy::AppendRegion);
        assert_eq!(tree.name(controls[0]), "Mine");

        let mut plain = control("a");
        plain.name = "Ignored".to_string();
        tree.apply_structure(&row(vec![Structure::Control(plain)]), None, ExtrasPolicy::AppendRegion);
        assert_eq!(tree.name(controls[0]), "Mine");
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let (tree, _) = live_tree(&["a", "b"]);
        let structure = tree.get_structure();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("layout.yaml");
        structure.save(&path).expect("save");
        let loaded = Structure::load(&path).expect("load");
        assert_eq!(loaded, structure);
        assert_eq!(loaded.control_ids(), vec!["a", "b"]);
    }
}
