use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{CursorIcon, Window};

use docksizer::cli::StartupConfig;
use docksizer::commands::Cmd;
use docksizer::dock::{DockSizer, HitTarget, Structure};
use docksizer::geometry::Rect;
use docksizer::input::{CursorKind, Modifiers, PointerEvent};
use docksizer::panel::TextMeasure;
use docksizer::panels::{demo_layout, DemoResolver};
use docksizer::theme::DockPalette;
use docksizer::view::GlyphText;

use super::renderer::Renderer;

/// How often feature popup timers are polled
const TIMER_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    sizer: DockSizer,
    palette: DockPalette,
    text: Option<Rc<GlyphText>>,
    layout_path: Option<PathBuf>,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    mouse_position: (i32, i32),
}

fn cursor_icon(kind: CursorKind) -> CursorIcon {
    match kind {
        CursorKind::Arrow => CursorIcon::Default,
        CursorKind::Hand => CursorIcon::Pointer,
        CursorKind::Sizing => CursorIcon::Move,
        CursorKind::ResizeNS => CursorIcon::RowResize,
        CursorKind::ResizeWE => CursorIcon::ColResize,
    }
}

fn modifiers_from(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

impl App {
    pub fn new(startup: StartupConfig) -> Result<Self> {
        let config = startup.config;
        let palette = config.resolve_palette();
        let text = GlyphText::discover(config.font_path.as_deref(), config.font_size).map(Rc::new);

        let mut sizer = match &text {
            Some(text) => DockSizer::with_text_measure(Rc::clone(text) as Rc<dyn TextMeasure>),
            None => DockSizer::new(),
        };
        sizer.set_extras_policy(config.extras_policy);
        sizer
            .set_contents(demo_layout())
            .map_err(|e| anyhow::anyhow!("Failed to build initial layout: {}", e))?;

        let layout_path = config.layout_path();
        if startup.reset {
            tracing::info!("Starting from the built-in layout");
        } else if let Some(path) = layout_path.as_deref().filter(|p| p.exists()) {
            match Structure::load(path) {
                Ok(structure) => sizer.set_structure(&structure, Some(&mut DemoResolver)),
                Err(e) => tracing::warn!("{}", e),
            }
        }

        Ok(Self {
            sizer,
            palette,
            text,
            layout_path,
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
            mouse_position: (0, 0),
        })
    }

    fn init_renderer(&mut self, window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<()> {
        let renderer = Renderer::new(window, context)?;
        let (width, height) = renderer.size();
        self.sizer
            .recalc_sizes(Rect::new(0, 0, width as i32, height as i32));
        self.renderer = Some(renderer);
        Ok(())
    }

    fn pointer_event(&self) -> PointerEvent {
        let (x, y) = self.mouse_position;
        PointerEvent::new(x, y).with_modifiers(modifiers_from(self.modifiers))
    }

    fn save_layout(&self) {
        let Some(path) = &self.layout_path else {
            return;
        };
        if let Err(e) = self.sizer.get_structure().save(path) {
            tracing::warn!("{}", e);
        }
    }

    /// Maximize the control under the pointer, or restore if maximized
    fn toggle_maximize(&mut self) {
        if !self.sizer.is_maximizable() {
            self.sizer.min_max(self.sizer.tree().root());
            return;
        }
        let (x, y) = self.mouse_position;
        let Some(HitTarget::Node(id)) = self.sizer.object_at(x, y, false) else {
            return;
        };
        let tree = self.sizer.tree();
        let control = if tree.control(id).is_some() {
            Some(id)
        } else {
            tree.region(id)
                .and_then(|r| r.active().and_then(|i| r.contents().get(i).copied()))
        };
        if let Some(control) = control {
            self.sizer.min_max(control);
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Cmd {
        if !self.modifiers.control_key() {
            return Cmd::None;
        }
        match code {
            KeyCode::KeyL => self.sizer.toggle_lock(),
            KeyCode::KeyR => self.sizer.reset_structure(),
            KeyCode::KeyM => self.toggle_maximize(),
            KeyCode::KeyS => self.save_layout(),
            _ => return Cmd::None,
        }
        Cmd::Redraw
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Cmd {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::error!("{}", e);
                    }
                }
                self.sizer
                    .recalc_sizes(Rect::new(0, 0, size.width as i32, size.height as i32));
                Cmd::Redraw
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                Cmd::None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x as i32, position.y as i32);
                let event = self.pointer_event();
                self.sizer.pointer_motion(&event)
            }
            WindowEvent::CursorLeft { .. } => self.sizer.pointer_leave(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let event = self.pointer_event();
                match state {
                    ElementState::Pressed => self.sizer.pointer_down(&event),
                    ElementState::Released => self.sizer.pointer_up(&event),
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(code) => self.handle_key(code),
                    PhysicalKey::Unidentified(_) => Cmd::None,
                }
            }
            WindowEvent::RedrawRequested => {
                self.sizer.flush_pending_layout();
                if let Err(e) = self.render() {
                    tracing::error!("Render failed: {}", e);
                }
                Cmd::None
            }
            _ => Cmd::None,
        }
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&mut self.sizer, &self.palette, self.text.as_deref())?;
        }
        Ok(())
    }

    fn process_cmd(&self, cmd: Cmd) {
        if let (Some(kind), Some(window)) = (cmd.cursor(), &self.window) {
            window.set_cursor(cursor_icon(kind));
        }
        let needs_redraw = cmd.needs_redraw();

        for cmd in cmd.flatten() {
            match cmd {
                Cmd::ControlActivated(id) => {
                    tracing::debug!("Activated {}", self.sizer.tree().name(id));
                }
                Cmd::DockAreaEmpty => tracing::info!("Dock area is empty"),
                Cmd::FeatureBarPopup(id) => {
                    tracing::debug!("Feature bar requested for {}", self.sizer.tree().name(id));
                }
                Cmd::OpenViewFor(id) => {
                    tracing::info!(
                        "No drop target for exported {}",
                        self.sizer.tree().name(id)
                    );
                }
                _ => {}
            }
        }

        if needs_redraw {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let min = self.sizer.calc_min();
        let window_attributes = Window::default_attributes()
            .with_title("docksizer")
            .with_inner_size(LogicalSize::new(1024, 700))
            .with_min_inner_size(PhysicalSize::new(min.width.max(1) as u32, min.height.max(1) as u32));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        let context = match Context::new(Rc::clone(&window)) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Failed to create graphics context: {}", e);
                event_loop.exit();
                return;
            }
        };
        if let Err(e) = self.init_renderer(Rc::clone(&window), &context) {
            tracing::error!("{}", e);
            event_loop.exit();
            return;
        }
        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }
        if matches!(event, WindowEvent::CloseRequested) {
            self.save_layout();
            event_loop.exit();
            return;
        }
        let cmd = self.handle_event(&event);
        self.process_cmd(cmd);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let cmd = self.sizer.poll_timers(now);
        let layout_ran = self.sizer.flush_pending_layout();
        self.process_cmd(cmd);
        if layout_ran {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(now + TIMER_INTERVAL));
    }
}
