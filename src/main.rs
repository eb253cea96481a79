//! Dock layout demo window

use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use docksizer::cli::CliArgs;
use docksizer::config::DockConfig;

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    let _guard = docksizer::tracing::init();

    let args = CliArgs::parse();
    let startup = args.into_config(DockConfig::load());

    let event_loop = EventLoop::new()?;
    let mut app = App::new(startup)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
