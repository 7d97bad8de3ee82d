use winit::dpi::LogicalSize;

use smile_core::logging::LoggingConfig;
use smile_core::RendererConfig;

use crate::device::GpuInit;

/// Desktop host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub window: WindowConfig,
    pub gpu: GpuInit,
    pub renderer: RendererConfig,
    pub logging: LoggingConfig,
    pub clear_color: wgpu::Color,
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            gpu: GpuInit::default(),
            renderer: RendererConfig::default(),
            logging: LoggingConfig::default(),
            clear_color: wgpu::Color {
                r: 0.23,
                g: 0.39,
                b: 0.51,
                a: 1.0,
            },
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "smile".to_string(),
            initial_size: LogicalSize::new(640.0, 960.0),
        }
    }
}
