use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::camera::{EditorCamera, CASCADE_Z_MULTIPLIER};
use crate::renderer::depth_array::SHADOW_MAP_RESOLUTION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "RenderSettings::default_shadow_map_size")]
    pub shadow_map_size: u32,
    #[serde(default)]
    pub outline_resolution: Resolution,
    #[serde(default = "RenderSettings::default_clear_color")]
    pub clear_color: [f32; 4],
    #[serde(default = "RenderSettings::default_cascade_z_multiplier")]
    pub cascade_z_multiplier: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadow_map_size: Self::default_shadow_map_size(),
            outline_resolution: Resolution::default(),
            clear_color: Self::default_clear_color(),
            cascade_z_multiplier: Self::default_cascade_z_multiplier(),
        }
    }
}

impl RenderSettings {
    pub fn load() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            info!("Using default render settings for WebAssembly build");
            return Self::default();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::load_from_path("render_settings.json")
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RenderSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded render settings from {:?}", path);
                    settings.validate()
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default render settings.",
                        path, err
                    );
                    RenderSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Render settings file {:?} not found. Using default settings.",
                    path
                );
                RenderSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default render settings.",
                    path, err
                );
                RenderSettings::default()
            }
        }
    }

    fn validate(mut self) -> Self {
        if self.shadow_map_size == 0 {
            warn!("Shadow map size must be greater than zero. Using default value.");
            self.shadow_map_size = Self::default_shadow_map_size();
        }

        if self.outline_resolution.width == 0 || self.outline_resolution.height == 0 {
            warn!("Outline resolution must be greater than zero. Using default resolution.");
            self.outline_resolution = Resolution::default();
        }

        if !(self.cascade_z_multiplier.is_finite() && self.cascade_z_multiplier >= 1.0) {
            warn!(
                "Cascade z multiplier {} is invalid. Using {} instead.",
                self.cascade_z_multiplier, CASCADE_Z_MULTIPLIER
            );
            self.cascade_z_multiplier = Self::default_cascade_z_multiplier();
        }

        self
    }

    pub fn apply_to_camera(&self, camera: &mut EditorCamera) {
        camera.set_z_multiplier(self.cascade_z_multiplier);
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }

    const fn default_shadow_map_size() -> u32 {
        SHADOW_MAP_RESOLUTION
    }

    const fn default_clear_color() -> [f32; 4] {
        [0.5, 0.1, 0.1, 1.0]
    }

    const fn default_cascade_z_multiplier() -> f32 {
        CASCADE_Z_MULTIPLIER
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
