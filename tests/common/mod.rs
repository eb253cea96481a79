//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use docksizer::commands::Cmd;
use docksizer::dock::{DockControl, DockSizer, LayoutSpec, NodeId, Surface};
use docksizer::geometry::{Rect, Size};
use docksizer::input::{Modifiers, PointerEvent};
use docksizer::panel::{FixedAdvance, Icon, Panel};
use docksizer::theme::Color;

/// What a `Probe` panel has been told by the layout
#[derive(Debug, Default, Clone)]
pub struct ProbeState {
    pub bounds: Rect,
    pub visible: bool,
    pub destroyed: bool,
}

/// Panel with a fixed natural size that records what the layout tells it
pub struct Probe {
    pub min: Size,
    pub state: Rc<RefCell<ProbeState>>,
}

impl Probe {
    pub fn new(width: i32, height: i32) -> (Self, Rc<RefCell<ProbeState>>) {
        let state = Rc::new(RefCell::new(ProbeState::default()));
        (
            Self {
                min: Size::new(width, height),
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl Panel for Probe {
    fn min_size(&self) -> Size {
        self.min
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.state.borrow_mut().bounds = bounds;
    }

    fn set_visible(&mut self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn destroy(&mut self) {
        self.state.borrow_mut().destroyed = true;
    }
}

/// A 100x50 control with a drag bar
pub fn control(id: &str) -> DockControl {
    sized(id, 100, 50)
}

pub fn sized(id: &str, width: i32, height: i32) -> DockControl {
    let (probe, _) = Probe::new(width, height);
    DockControl::new(id, id.to_uppercase()).with_panel(probe)
}

pub fn spec(control: DockControl) -> LayoutSpec {
    LayoutSpec::Control(control)
}

/// Sizer measuring every label character as 6 pixels wide
pub fn sizer() -> DockSizer {
    DockSizer::with_text_measure(Rc::new(FixedAdvance(6)))
}

/// Build `spec` and lay it out in a `width` x `height` window, the way a
/// host does on its first resize
pub fn laid_out(spec: LayoutSpec, width: i32, height: i32) -> DockSizer {
    let mut sizer = sizer();
    sizer.set_contents(spec).expect("valid layout");
    sizer.calc_min();
    sizer.recalc_sizes(Rect::new(0, 0, width, height));
    sizer
}

/// `a | b | c` with `a` and `b` sharing a notebook
pub fn notebook_and_bar() -> DockSizer {
    laid_out(
        LayoutSpec::Section(vec![
            LayoutSpec::Region(vec![spec(control("a")), spec(control("b"))]),
            spec(control("c")),
        ]),
        600,
        300,
    )
}

pub fn id(sizer: &DockSizer, control_id: &str) -> NodeId {
    sizer
        .tree()
        .find_control(control_id)
        .unwrap_or_else(|| panic!("no control {control_id}"))
}

/// Press, move past the drag threshold, move to `to`, release there
pub fn drag(sizer: &mut DockSizer, from: (i32, i32), to: (i32, i32), modifiers: Modifiers) -> Cmd {
    let at = |(x, y): (i32, i32)| PointerEvent::new(x, y).with_modifiers(modifiers);
    let mut cmds = vec![sizer.pointer_down(&at(from))];
    cmds.push(sizer.pointer_motion(&at((from.0 + 10, from.1 + 10))));
    cmds.push(sizer.pointer_motion(&at(to)));
    cmds.push(sizer.pointer_up(&at(to)));
    sizer.flush_pending_layout();
    Cmd::batch(cmds)
}

/// Press and release without moving
pub fn click(sizer: &mut DockSizer, at: (i32, i32)) -> Cmd {
    let event = PointerEvent::new(at.0, at.1);
    let down = sizer.pointer_down(&event);
    let up = sizer.pointer_up(&event);
    sizer.flush_pending_layout();
    down.and(up)
}

/// Where to grab a control: just inside the left end of its tab or bar
pub fn grip(sizer: &DockSizer, control: NodeId) -> (i32, i32) {
    let db = sizer.tree().drag_bounds(control);
    (db.x + 3, db.y + db.height / 2)
}

pub fn center(rect: Rect) -> (i32, i32) {
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}

/// Control ids in tree order
pub fn order(sizer: &DockSizer) -> Vec<String> {
    let tree = sizer.tree();
    tree.get_controls(tree.root(), false)
        .into_iter()
        .filter_map(|c| tree.control(c).map(|c| c.id.clone()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Fill(Rect, Color),
    Line(i32, i32, i32, i32),
    Text(i32, i32, String),
    Icon(i32, i32),
    Xor(Vec<Rect>),
}

/// Surface that records calls instead of rasterizing them
#[derive(Default)]
pub struct RecordingSurface {
    pub drawn: Vec<Drawn>,
    clip: Option<Rect>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.drawn
            .iter()
            .filter_map(|d| match d {
                Drawn::Text(_, _, t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn xors(&self) -> Vec<&Vec<Rect>> {
        self.drawn
            .iter()
            .filter_map(|d| match d {
                Drawn::Xor(rects) => Some(rects),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.drawn.push(Drawn::Fill(rect, color));
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, _color: Color) {
        self.drawn.push(Drawn::Line(x0, y0, x1, y1));
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, _color: Color) {
        self.drawn.push(Drawn::Text(x, y, text.to_string()));
    }

    fn draw_icon(&mut self, x: i32, y: i32, _icon: &Icon) {
        self.drawn.push(Drawn::Icon(x, y));
    }

    fn xor_rects(&mut self, rects: &[Rect], _color: Color) {
        self.drawn.push(Drawn::Xor(rects.to_vec()));
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}
