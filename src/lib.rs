pub mod camera;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use camera::{CameraInput, EditorCamera};
pub use renderer::{
    DrawSubmitter, GpuContext, RenderTarget, RenderTargetSpec, SceneRenderer, Shader,
};
pub use scene::Scene;
pub use settings::RenderSettings;

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    // Set panic hook to get better error messages
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Module start hook for web builds: installs the panic hook and console logger.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("scene-render-core loaded - WebAssembly");
}
