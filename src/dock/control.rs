//! Leaf nodes: one user panel plus its tab/drag-bar configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::commands::Cmd;
use crate::geometry::{Rect, Size};
use crate::panel::{CloseCallback, Dockable, Icon, Panel};

use super::feature::FeatureState;
use super::tree::{DockTree, NodeId};

/// How a control's drag bar or tab is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockStyle {
    /// Drag bar above the panel
    #[default]
    Horizontal,
    /// Drag bar to the left of the panel
    Vertical,
    /// Always shown as a notebook tab, even when alone
    Tab,
    /// No drag bar; cannot be dragged
    Fixed,
}

impl fmt::Display for DockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DockStyle::Horizontal => "horizontal",
            DockStyle::Vertical => "vertical",
            DockStyle::Tab => "tab",
            DockStyle::Fixed => "fixed",
        })
    }
}

/// A dockable panel and its presentation settings
pub struct DockControl {
    /// Stable key used when saving and restoring layouts
    pub id: String,
    /// Display name shown on the tab
    pub name: String,
    /// The user renamed the control; a restored layout keeps that name
    pub user_name: bool,
    pub style: DockStyle,
    /// The user picked the style; a restored layout keeps it
    pub user_style: bool,
    /// Category used when the control is dragged out of the dock area
    pub export: String,
    pub visible: bool,
    pub locked: bool,
    pub resizable: bool,
    pub closeable: bool,
    /// Optional icon drawn on the tab before the label
    pub image: Option<Icon>,
    pub(crate) panel: Option<Box<dyn Panel>>,
    pub(crate) dockable: Option<Box<dyn Dockable>>,
    pub(crate) on_close: Option<CloseCallback>,
    pub(crate) features: FeatureState,
}

impl fmt::Debug for DockControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockControl")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("style", &self.style)
            .field("visible", &self.visible)
            .field("locked", &self.locked)
            .field("resizable", &self.resizable)
            .field("closeable", &self.closeable)
            .field("has_panel", &self.panel.is_some())
            .field("feature_mode", &self.features.mode)
            .finish()
    }
}

impl DockControl {
    /// A control without a panel yet; attach one with `with_panel`
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            user_name: false,
            style: DockStyle::default(),
            user_style: false,
            export: String::new(),
            visible: true,
            locked: false,
            resizable: true,
            closeable: false,
            image: None,
            panel: None,
            dockable: None,
            on_close: None,
            features: FeatureState::default(),
        }
    }

    pub fn with_panel(mut self, panel: impl Panel + 'static) -> Self {
        self.panel = Some(Box::new(panel));
        self
    }

    pub fn with_boxed_panel(mut self, panel: Box<dyn Panel>) -> Self {
        self.panel = Some(panel);
        self
    }

    pub fn with_style(mut self, style: DockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_closeable(mut self, closeable: bool) -> Self {
        self.closeable = closeable;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_export(mut self, export: impl Into<String>) -> Self {
        self.export = export.into();
        self
    }

    pub fn with_image(mut self, image: Icon) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_dockable(mut self, dockable: impl Dockable + 'static) -> Self {
        self.dockable = Some(Box::new(dockable));
        self
    }

    /// Callback asked before closing; returning `false` vetoes the close
    pub fn with_on_close(mut self, on_close: impl FnMut(NodeId, bool) -> bool + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn panel(&self) -> Option<&dyn Panel> {
        self.panel.as_deref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut (dyn Panel + 'static)> {
        self.panel.as_deref_mut()
    }

    pub fn has_dockable(&self) -> bool {
        self.dockable.is_some()
    }

    pub fn features(&self) -> &FeatureState {
        &self.features
    }
}

// ============================================================================
// Control operations on the tree
// ============================================================================

impl DockTree {
    /// Natural size of the control's panel; the first query also records it
    /// as the control's explicit size
    pub(crate) fn calc_min_control(&mut self, id: NodeId, use_size: bool) -> Size {
        self.check_features(id);
        let Some(node) = self.get_mut(id) else {
            return Size::default();
        };
        let (mut dx, mut dy) = (node.width, node.height);
        let natural = match &node.kind {
            super::tree::NodeKind::Control(c) => c.panel.as_ref().map(|p| p.min_size()),
            _ => None,
        };
        if let Some(size) = natural {
            dx = size.width;
            dy = size.height;
            if node.width < 0 {
                node.width = dx;
                node.height = dy;
            }
        }
        if use_size && node.width >= 0 {
            return Size::new(node.width, node.height);
        }
        Size::new(dx, dy)
    }

    pub(crate) fn recalc_control(&mut self, id: NodeId, rect: Rect) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let rect = Rect::new(rect.x, rect.y, rect.width.max(0), rect.height.max(0));
        node.width = rect.width;
        node.height = rect.height;
        node.bounds = rect;
        if let super::tree::NodeKind::Control(c) = &mut node.kind {
            if let Some(panel) = c.panel.as_mut() {
                panel.set_bounds(rect);
            }
        }
    }

    /// Show or hide a control (or every control in a group)
    pub fn show(&mut self, id: NodeId, visible: bool, layout: bool) {
        if let Some(control) = self.control_mut(id) {
            if control.visible != visible {
                control.visible = visible;
                if let Some(parent) = self.parent(id) {
                    self.show_hide(parent, id);
                }
                if layout {
                    self.request_layout();
                }
            }
            return;
        }
        for child in self.contents(id) {
            self.show(child, visible, false);
        }
        if layout {
            self.request_layout();
        }
    }

    /// Rename a control; the tab width changes so a layout is requested
    pub fn set_name(&mut self, id: NodeId, name: &str, layout: bool) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        if control.name != name {
            control.name = name.to_string();
            if layout {
                self.request_layout();
            }
        }
    }

    /// Make the node the active tab of its notebook
    pub fn activate(&mut self, id: NodeId, layout: bool) {
        if let Some(parent) = self.parent(id) {
            if self.region(parent).is_some() {
                self.activate_in_region(parent, id, layout);
            }
        }
    }

    /// Close a control or every control of a group.
    ///
    /// A control asks its close callback, else its dockable delegate, else
    /// destroys its panel. A `false` answer leaves it in place. Returns
    /// whether the node was removed from the tree.
    pub fn close(&mut self, id: NodeId, layout: bool, force: bool) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        if node.is_group() {
            for child in self.contents(id) {
                self.close(child, false, force);
            }
            if layout {
                self.request_layout();
                self.push_cmd(Cmd::Redraw);
            }
            return !self.contains(id);
        }

        let Some(control) = self.control_mut(id) else {
            return false;
        };
        if control.panel.is_none() {
            return false;
        }
        if let Some(on_close) = control.on_close.as_mut() {
            if !on_close(id, force) {
                tracing::debug!("Close of {} vetoed by callback", id);
                return false;
            }
        } else if let Some(dockable) = control.dockable.as_mut() {
            if !dockable.close(id, force) {
                tracing::debug!("Close of {} vetoed by dockable", id);
                return false;
            }
        } else if let Some(panel) = control.panel.as_mut() {
            panel.destroy();
        }

        self.reset_features(id);
        if let Some(parent) = self.parent(id) {
            self.remove(parent, id);
        }
        if let Some(node) = self.free(id) {
            tracing::debug!("Closed control {}", node.id);
        }
        if layout {
            self.request_layout();
            self.push_cmd(Cmd::Redraw);
        }
        true
    }
}
