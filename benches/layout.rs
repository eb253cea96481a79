//! Benchmarks for layout passes and drop-target lookup
//!
//! Run with: cargo bench layout

use std::rc::Rc;

use docksizer::dock::{DockControl, DockSizer, DragSize, LayoutSpec};
use docksizer::geometry::{Rect, Size};
use docksizer::panel::{FixedAdvance, Panel};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

struct Fixed;

impl Panel for Fixed {
    fn min_size(&self) -> Size {
        Size::new(80, 40)
    }
    fn set_bounds(&mut self, _bounds: Rect) {}
    fn set_visible(&mut self, _visible: bool) {}
}

/// Alternating rows and columns `depth` levels deep, each level holding a
/// three-tab notebook next to the next level
fn nested(depth: usize, next_id: &mut usize) -> LayoutSpec {
    let mut notebook = Vec::new();
    for _ in 0..3 {
        *next_id += 1;
        let id = format!("panel{}", next_id);
        notebook.push(LayoutSpec::Control(
            DockControl::new(id.clone(), id).with_panel(Fixed),
        ));
    }
    let mut items = vec![LayoutSpec::Region(notebook)];
    if depth > 1 {
        items.push(nested(depth - 1, next_id));
    }
    LayoutSpec::Section(items)
}

fn sizer_with_depth(depth: usize) -> DockSizer {
    let mut sizer = DockSizer::with_text_measure(Rc::new(FixedAdvance(7)));
    let mut next_id = 0;
    if let Err(e) = sizer.set_contents(nested(depth, &mut next_id)) {
        panic!("{}", e);
    }
    sizer.calc_min();
    sizer.recalc_sizes(Rect::new(0, 0, 1920, 1080));
    sizer
}

// ============================================================================
// Layout passes
// ============================================================================

#[divan::bench(args = [2, 4, 8, 16])]
fn calc_min(bencher: divan::Bencher, depth: usize) {
    let mut sizer = sizer_with_depth(depth);
    bencher.bench_local(|| divan::black_box(sizer.calc_min()));
}

#[divan::bench(args = [2, 4, 8, 16])]
fn recalc_sizes(bencher: divan::Bencher, depth: usize) {
    let mut sizer = sizer_with_depth(depth);
    let mut wide = false;
    bencher.bench_local(|| {
        wide = !wide;
        let width = if wide { 1920 } else { 1600 };
        sizer.recalc_sizes(Rect::new(0, 0, width, 1080));
    });
}

#[divan::bench(args = [2, 8])]
fn build_contents(depth: usize) -> DockSizer {
    sizer_with_depth(depth)
}

// ============================================================================
// Hit-testing
// ============================================================================

#[divan::bench(args = [2, 4, 8, 16])]
fn dock_info_at(bencher: divan::Bencher, depth: usize) {
    let sizer = sizer_with_depth(depth);
    let size = DragSize::new(80, 40, 60);
    bencher.bench_local(|| {
        for (x, y) in [(10, 10), (1900, 1070), (960, 540), (1919, 5)] {
            divan::black_box(sizer.dock_info_at(x, y, size, false));
        }
    });
}

#[divan::bench(args = [2, 16])]
fn object_at(bencher: divan::Bencher, depth: usize) {
    let sizer = sizer_with_depth(depth);
    bencher.bench_local(|| {
        for (x, y) in [(10, 10), (1900, 1070), (960, 540)] {
            divan::black_box(sizer.object_at(x, y, false));
        }
    });
}

#[divan::bench]
fn get_structure(bencher: divan::Bencher) {
    let sizer = sizer_with_depth(8);
    bencher.bench_local(|| divan::black_box(sizer.get_structure()));
}
