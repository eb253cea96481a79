//! Pluggable feature overlays on controls
//!
//! A feature contributes an icon on a control's tab or drag bar, may accept
//! objects dropped from an external drag, and can be disabled or disposed.
//! Factories are installed into an explicit `FeatureRegistry` owned by the
//! tree; each control remembers how many registry entries it has already
//! consulted, so newly installed factories are applied on the next size query.
//!
//! The icon state of a control is a small machine over `FeatureMode`:
//!
//! ```text
//! None --install--> PreNormal --first draw--> Normal | Disabled
//! Normal --changed--> Changed
//! Normal --external drag hovers--> Drop | Disabled --drag ends--> (saved)
//! Normal/Drop --hover 100ms--> Visible/DropVisible --bar closed--> Normal/Drop
//! ```

use std::any::Any;
use std::time::Instant;

use crate::commands::Cmd;
use crate::input::PointerEvent;
use crate::panel::Icon;

use super::constants::{
    BAR_FEATURE_HEIGHT, BAR_FEATURE_WIDTH, FEATURE_POPUP_DELAY, TAB_FEATURE_HEIGHT,
    TAB_FEATURE_WIDTH,
};
use super::control::{DockControl, DockStyle};
use super::region::TabState;
use super::tree::{DockTree, NodeId};
use crate::geometry::Rect;

/// One overlay affordance attached to a control
pub trait Feature {
    /// Icon to show in the feature bar; `None` means currently unavailable
    fn bitmap(&self) -> Option<&Icon>;

    /// Whether an object from an external drag can be dropped on this feature
    fn can_drop(&self, _object: &dyn Any) -> bool {
        false
    }

    /// Accept a dropped object; returns whether it was consumed
    fn on_drop(&mut self, _object: &dyn Any) -> bool {
        false
    }

    /// The feature's icon was clicked in the feature bar
    fn click(&mut self) {}

    /// The factory that created this feature is not enabled
    fn disable(&mut self) {}

    /// The control is closing or its features are being reset
    fn dispose(&mut self) {}
}

/// Creates the features a given control should carry
pub trait FeatureFactory {
    fn name(&self) -> &str;

    /// Features for `control`; an empty list means none apply
    fn new_features_for(&self, control: &DockControl) -> Vec<Box<dyn Feature>>;
}

struct RegisteredFactory {
    factory: Box<dyn FeatureFactory>,
    enabled: bool,
}

/// Append-only list of installed feature factories
#[derive(Default)]
pub struct FeatureRegistry {
    entries: Vec<RegisteredFactory>,
}

impl FeatureRegistry {
    pub fn add(&mut self, factory: Box<dyn FeatureFactory>) {
        tracing::debug!("Installed feature factory '{}'", factory.name());
        self.entries.push(RegisteredFactory {
            factory,
            enabled: true,
        });
    }

    /// Register a factory whose features start out disabled
    pub fn add_disabled(&mut self, factory: Box<dyn FeatureFactory>) {
        self.entries.push(RegisteredFactory {
            factory,
            enabled: false,
        });
    }

    /// Number of entries ever installed; controls compare against it
    pub fn version(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.factory.name()).collect()
    }
}

/// Icon state of a control's feature trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeatureMode {
    /// No features installed
    #[default]
    None,
    Normal,
    /// A feature reported new or changed state
    Changed,
    /// An external drag hovers and some feature accepts its object
    Drop,
    /// Features installed but none currently has an icon
    Disabled,
    /// The feature bar is popped up
    Visible,
    /// The feature bar is popped up for a pending drop
    DropVisible,
    /// Installed but not resolved yet; resolved on first draw
    PreNormal,
}

impl FeatureMode {
    /// Modes in which no trigger icon is shown
    pub fn hides_icon(self) -> bool {
        matches!(
            self,
            FeatureMode::None
                | FeatureMode::Disabled
                | FeatureMode::Visible
                | FeatureMode::DropVisible
        )
    }

    /// The feature bar is currently popped up
    pub fn bar_visible(self) -> bool {
        matches!(self, FeatureMode::Visible | FeatureMode::DropVisible)
    }
}

/// Mode saved when an external drag starts hovering the dock area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedMode {
    pub mode: FeatureMode,
    /// Saved by a hover over this control's own trigger icon
    pub external: bool,
}

/// A pending feature bar popup, armed at the hover coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupTask {
    pub armed_xy: (i32, i32),
    pub due: Instant,
}

/// Per-control feature bookkeeping
#[derive(Default)]
pub struct FeatureState {
    pub(crate) features: Vec<Box<dyn Feature>>,
    /// Indices into `features` that accept the current drag object
    pub(crate) drop_features: Vec<usize>,
    pub(crate) mode: FeatureMode,
    pub(crate) saved: Option<SavedMode>,
    /// Registry entries already applied to this control
    pub(crate) applied: usize,
    pub(crate) popup_xy: Option<(i32, i32)>,
    pub(crate) popup_task: Option<PopupTask>,
}

impl FeatureState {
    pub fn mode(&self) -> FeatureMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn drop_count(&self) -> usize {
        self.drop_features.len()
    }

    pub fn popup_pending(&self) -> bool {
        self.popup_task.is_some()
    }

    /// Features in use: the drop candidates during a drag, otherwise all
    fn active_indices(&self) -> Vec<usize> {
        if self.drop_features.is_empty() {
            (0..self.features.len()).collect()
        } else {
            self.drop_features.clone()
        }
    }

    /// Bitmaps of the active features, for the feature bar
    pub fn active_bitmaps(&self) -> Vec<&Icon> {
        self.active_indices()
            .into_iter()
            .filter_map(|i| self.features.get(i).and_then(|f| f.bitmap()))
            .collect()
    }

    fn any_icon(&self, indices: &[usize]) -> bool {
        indices
            .iter()
            .any(|i| self.features.get(*i).is_some_and(|f| f.bitmap().is_some()))
    }

    /// Resolve Normal/Drop/Disabled from the features' icons.
    ///
    /// With `changed`, an available icon yields `Changed` instead; a
    /// control still in `PreNormal` is left alone so its first draw
    /// resolves it.
    pub(crate) fn set_feature_mode(&mut self, changed: bool) -> FeatureMode {
        if !changed || self.mode != FeatureMode::PreNormal {
            let (candidate, indices) = if self.drop_features.is_empty() {
                (FeatureMode::Normal, (0..self.features.len()).collect())
            } else {
                (FeatureMode::Drop, self.drop_features.clone())
            };
            self.mode = if self.any_icon(&indices) {
                if changed {
                    FeatureMode::Changed
                } else {
                    candidate
                }
            } else {
                FeatureMode::Disabled
            };
        }
        self.mode
    }

    /// Mode to draw with, resolving a deferred `PreNormal`
    pub(crate) fn draw_mode(&mut self) -> FeatureMode {
        if self.mode == FeatureMode::PreNormal {
            self.set_feature_mode(false)
        } else {
            self.mode
        }
    }

    /// Prepare for an external drag carrying `object`. Nested calls are
    /// ignored until the matching `post_drag`.
    pub(crate) fn pre_drag(&mut self, visible: bool, object: &dyn Any, external: bool) -> bool {
        if !visible || self.mode == FeatureMode::None || self.saved.is_some() {
            return false;
        }
        self.drop_features = self
            .features
            .iter()
            .enumerate()
            .filter(|(_, f)| f.can_drop(object) && f.bitmap().is_some())
            .map(|(i, _)| i)
            .collect();
        self.saved = Some(SavedMode {
            mode: self.mode,
            external,
        });
        self.mode = if self.drop_features.is_empty() {
            FeatureMode::Disabled
        } else {
            FeatureMode::Drop
        };
        true
    }

    /// Undo `pre_drag`. An `external` release only undoes a save made by an
    /// external trigger hover.
    pub(crate) fn post_drag(&mut self, external: bool) -> bool {
        let applies = match self.saved {
            None => true,
            Some(saved) => !external || saved.external,
        };
        if !applies {
            return false;
        }
        self.drop_features.clear();
        if self.mode == FeatureMode::None {
            return false;
        }
        match self.saved.take() {
            Some(saved) => self.mode = saved.mode,
            None => {
                self.set_feature_mode(false);
            }
        }
        true
    }
}

// ============================================================================
// Feature operations on the tree
// ============================================================================

impl DockTree {
    /// Apply registry entries installed since the control last checked
    pub(crate) fn check_features(&mut self, id: NodeId) {
        let version = self.registry().version();
        let Some(control) = self.control(id) else {
            return;
        };
        if control.features.applied >= version || control.panel.is_none() {
            return;
        }
        let start = control.features.applied;
        let mut additions = Vec::new();
        for entry in &self.registry().entries[start..version] {
            let new = entry.factory.new_features_for(control);
            if !new.is_empty() {
                additions.push((entry.enabled, new));
            }
        }

        let Some(control) = self.control_mut(id) else {
            return;
        };
        let state = &mut control.features;
        for (enabled, mut features) in additions {
            let mode = state.mode;
            if mode == FeatureMode::None {
                state.mode = FeatureMode::PreNormal;
            }
            if !enabled {
                for feature in features.iter_mut() {
                    feature.disable();
                }
                state.features.extend(features);
            } else {
                state.features.extend(features);
                if matches!(mode, FeatureMode::Normal | FeatureMode::Disabled) {
                    state.set_feature_mode(true);
                }
            }
        }
        state.applied = version;
    }

    /// Dispose every feature of a control; they are re-created on the next
    /// size query
    pub fn reset_features(&mut self, id: NodeId) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        for feature in control.features.features.iter_mut() {
            feature.dispose();
        }
        control.features = FeatureState::default();
    }

    /// A feature of `id` changed state; flash its trigger icon
    pub fn feature_changed(&mut self, id: NodeId) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        control.features.set_feature_mode(true);
        self.redraw_control(id);
    }

    /// Rectangle of the feature trigger icon on the node's tab or bar
    pub fn feature_trigger_bounds(&self, id: NodeId) -> Rect {
        let db = self.drag_bounds(id);
        if self.is_tab(id) {
            let dy = if self.tab_state(id) == TabState::Active {
                6
            } else {
                8
            };
            return Rect::new(db.x + 9, db.y + dy, TAB_FEATURE_WIDTH, TAB_FEATURE_HEIGHT);
        }
        let (ox, oy) = if self.style(id) == DockStyle::Vertical {
            (4, 10)
        } else {
            (10, 4)
        };
        Rect::new(db.x + ox, db.y + oy, BAR_FEATURE_WIDTH, BAR_FEATURE_HEIGHT)
    }

    /// Where the feature bar should pop up for `id`
    pub fn feature_popup_position(&self, id: NodeId) -> (i32, i32) {
        let db = self.drag_bounds(id);
        (db.x + 5, db.y + 3)
    }

    /// Check whether the pointer is over the control's feature trigger and,
    /// if so, arm the delayed popup. During an external drag `object` is the
    /// dragged payload.
    pub fn feature_activate(
        &mut self,
        id: NodeId,
        event: &PointerEvent,
        object: Option<&dyn Any>,
    ) -> bool {
        let Some(control) = self.control(id) else {
            return false;
        };
        if control.features.mode.hides_icon() {
            return false;
        }
        let xy = event.position();
        if control.features.popup_xy == Some(xy) {
            return true;
        }
        if !self.feature_trigger_bounds(id).contains(xy.0, xy.1) {
            if control.features.popup_xy.is_some() {
                tracing::trace!("Pointer left feature trigger of {}", id);
                self.reset_feature_popup(id);
            }
            return false;
        }

        let visible = self.is_visible(id);
        let Some(control) = self.control_mut(id) else {
            return false;
        };
        let state = &mut control.features;
        let mut redraw = false;
        if let Some(object) = object {
            redraw = state.pre_drag(visible, object, true);
        }
        state.popup_xy = Some(xy);
        state.popup_task = Some(PopupTask {
            armed_xy: xy,
            due: event.time + FEATURE_POPUP_DELAY,
        });
        tracing::trace!("Armed feature popup for {} at {:?}", id, xy);
        if redraw {
            self.redraw_control(id);
        }
        true
    }

    /// Cancel a pending popup; the armed task then fizzles
    pub fn reset_feature_popup(&mut self, id: NodeId) {
        if let Some(control) = self.control_mut(id) {
            control.features.popup_xy = None;
        }
    }

    /// Fire popup tasks that are due. Returns whether any task ran.
    pub fn poll_feature_timers(&mut self, now: Instant) -> bool {
        let due: Vec<NodeId> = self
            .get_controls(self.root(), false)
            .into_iter()
            .filter(|id| {
                self.control(*id)
                    .and_then(|c| c.features.popup_task)
                    .is_some_and(|t| t.due <= now)
            })
            .collect();
        for id in &due {
            self.feature_popup(*id);
        }
        !due.is_empty()
    }

    fn feature_popup(&mut self, id: NodeId) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        let state = &mut control.features;
        let Some(task) = state.popup_task.take() else {
            return;
        };
        if state.popup_xy == Some(task.armed_xy) {
            state.mode = if state.mode == FeatureMode::Drop {
                FeatureMode::DropVisible
            } else {
                FeatureMode::Visible
            };
            state.popup_xy = None;
            tracing::debug!("Feature bar popup for {}", id);
            self.push_cmd(Cmd::FeatureBarPopup(id));
            self.redraw_control(id);
        } else if state.post_drag(true) {
            self.redraw_control(id);
        }
    }

    /// The host closed the feature bar of `id`
    pub fn feature_bar_closed(&mut self, id: NodeId) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        control.features.mode = if control.features.mode == FeatureMode::DropVisible {
            FeatureMode::Drop
        } else {
            FeatureMode::Normal
        };
        self.redraw_control(id);
    }

    /// Prepare one control for an external drag hovering the dock area
    pub fn pre_drag(&mut self, id: NodeId, object: &dyn Any) {
        let visible = self.is_visible(id);
        let changed = self
            .control_mut(id)
            .is_some_and(|c| c.features.pre_drag(visible, object, false));
        if changed {
            self.redraw_control(id);
        }
    }

    /// Prepare every control for an external drag
    pub fn pre_drag_all(&mut self, object: &dyn Any) {
        for id in self.get_controls(self.root(), false) {
            self.pre_drag(id, object);
        }
    }

    pub fn post_drag(&mut self, id: NodeId) {
        let changed = self
            .control_mut(id)
            .is_some_and(|c| c.features.post_drag(false));
        if changed {
            self.redraw_control(id);
        }
    }

    /// Restore every control after an external drag ends
    pub fn post_drag_all(&mut self) {
        for id in self.get_controls(self.root(), false) {
            self.post_drag(id);
        }
    }

    /// Offer a dropped object to the first accepting drop feature of `id`
    pub fn drop_on_features(&mut self, id: NodeId, object: &dyn Any) -> bool {
        let Some(control) = self.control_mut(id) else {
            return false;
        };
        let state = &mut control.features;
        let candidates = state.drop_features.clone();
        for i in candidates {
            if let Some(feature) = state.features.get_mut(i) {
                if feature.on_drop(object) {
                    return true;
                }
            }
        }
        false
    }

    /// Forward a click on the `index`th icon of the feature bar
    pub fn click_feature(&mut self, id: NodeId, index: usize) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        let state = &mut control.features;
        if let Some(i) = state.active_indices().get(index).copied() {
            if let Some(feature) = state.features.get_mut(i) {
                feature.click();
            }
        }
    }

    /// Repaint just the node's tab or drag bar
    pub(crate) fn redraw_control(&mut self, id: NodeId) {
        let rect = self.drag_bounds(id);
        if !rect.is_empty() {
            self.push_cmd(Cmd::RedrawRect(rect));
        }
    }
}
