//! Desktop host for smile-core.
//!
//! Plays the role a platform binding plays on mobile: owns the window, turns
//! its lifecycle into renderer host events, and supplies a wgpu backend.

mod config;
mod device;
mod host;

use std::sync::Arc;

use anyhow::Result;

use smile_core::logging::init_logging;
use smile_core::{RendererCore, SharedRenderer};

use crate::config::HostConfig;
use crate::device::WgpuBackend;

fn main() -> Result<()> {
    let config = HostConfig::default();
    init_logging(config.logging.clone());

    let backend = WgpuBackend::new(config.gpu.clone(), config.clear_color);
    let renderer = Arc::new(SharedRenderer::new(RendererCore::new(
        backend,
        config.renderer.clone(),
    )));

    host::run(config.window.clone(), renderer.clone())?;

    let core = renderer.lock();
    if !core.state().is_terminal() {
        log::warn!("event loop exited without tear down (state {})", core.state());
    }
    log::info!("session finished in state {}: {:?}", core.state(), core.stats());
    for err in core.diagnostics().iter() {
        log::debug!("absorbed: {err}");
    }

    Ok(())
}
