//! Panel implementations for the demo window
//!
//! ## Available Panels
//!
//! - **PlaceholderPanel**: flat colored panel showing its title and size

mod placeholder;

pub use placeholder::PlaceholderPanel;

use crate::dock::{DockControl, DockStyle, LayoutSpec, StructureResolver};
use crate::panel::Panel;
use crate::theme::Color;

/// Demo panels: (id, display name, color)
pub const DEMO_PANELS: &[(&str, &str, Color)] = &[
    ("files", "Files", Color::rgb(0xDC, 0xE6, 0xF0)),
    ("outline", "Outline", Color::rgb(0xE6, 0xF0, 0xDC)),
    ("editor", "Editor", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("notes", "Notes", Color::rgb(0xFA, 0xF0, 0xC8)),
    ("terminal", "Terminal", Color::rgb(0x28, 0x2C, 0x34)),
    ("problems", "Problems", Color::rgb(0xF0, 0xDC, 0xDC)),
    ("output", "Output", Color::rgb(0x32, 0x36, 0x40)),
];

fn demo_entry(id: &str) -> Option<&'static (&'static str, &'static str, Color)> {
    DEMO_PANELS.iter().find(|(demo_id, _, _)| *demo_id == id)
}

/// Placeholder panel for one of the demo ids
pub fn demo_panel(id: &str) -> Option<PlaceholderPanel> {
    demo_entry(id).map(|(_, name, color)| PlaceholderPanel::new(*name, *color))
}

/// Dock control wrapping the demo panel `id`
pub fn demo_control(id: &str) -> Option<DockControl> {
    let (id, name, _) = demo_entry(id)?;
    let panel = demo_panel(id)?;
    Some(DockControl::new(*id, *name).with_panel(panel))
}

fn control(id: &str) -> LayoutSpec {
    match demo_control(id) {
        Some(control) => LayoutSpec::Control(control),
        None => LayoutSpec::Region(Vec::new()),
    }
}

/// Initial layout: a file/outline notebook on the left, the editor with a
/// bottom notebook in the middle, and a vertical-bar notes column on the right
pub fn demo_layout() -> LayoutSpec {
    let notes = demo_control("notes")
        .map(|c| c.with_style(DockStyle::Vertical))
        .map_or(LayoutSpec::Region(Vec::new()), LayoutSpec::Control);

    LayoutSpec::Section(vec![
        LayoutSpec::Region(vec![control("files"), control("outline")]),
        LayoutSpec::Section(vec![
            control("editor"),
            LayoutSpec::Region(vec![
                control("terminal"),
                control("problems"),
                control("output"),
            ]),
        ]),
        notes,
    ])
}

/// Recreates demo panels named by a saved layout but missing from the
/// running one
#[derive(Debug, Default)]
pub struct DemoResolver;

impl StructureResolver for DemoResolver {
    fn resolve_id(&mut self, id: &str) -> Option<Box<dyn Panel>> {
        demo_panel(id).map(|p| Box::new(p) as Box<dyn Panel>)
    }
}
