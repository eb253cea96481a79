//! Software renderer: paints the dock layout into a softbuffer surface

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::Result;
use softbuffer::Surface;
use winit::window::Window;

use docksizer::dock::DockSizer;
use docksizer::theme::DockPalette;
use docksizer::view::{Frame, GlyphText};

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents are preserved between
    /// frames, so we keep our own buffer and copy it on present.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

fn non_zero(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

impl Renderer {
    pub fn new(window: Rc<Window>, context: &softbuffer::Context<Rc<Window>>) -> Result<Self> {
        let size = window.inner_size();
        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;
        surface
            .resize(non_zero(size.width), non_zero(size.height))
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        Ok(Self {
            surface,
            back_buffer: vec![0u32; (size.width as usize) * (size.height as usize)],
            width: size.width,
            height: size.height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if (width, height) == (self.width, self.height) || width == 0 || height == 0 {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.back_buffer
            .resize((width as usize) * (height as usize), 0);
        self.surface
            .resize(non_zero(width), non_zero(height))
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        Ok(())
    }

    pub fn render(
        &mut self,
        sizer: &mut DockSizer,
        palette: &DockPalette,
        text: Option<&GlyphText>,
    ) -> Result<()> {
        {
            let mut frame = Frame::new(
                &mut self.back_buffer,
                self.width as usize,
                self.height as usize,
            );
            if let Some(text) = text {
                frame = frame.with_text(text);
            }
            frame.clear(palette.background);
            sizer.draw(&mut frame, palette);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        if buffer.len() == self.back_buffer.len() {
            buffer.copy_from_slice(&self.back_buffer);
        }
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}
