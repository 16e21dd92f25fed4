pub mod context;
pub mod depth_array;
pub mod formats;
pub mod geometry;
pub mod lights;
pub mod readback;
pub mod render_target;
pub mod scene_renderer;
pub mod shader;
pub mod skybox;
pub mod submit;

pub use context::{ContextError, GpuContext};
pub use depth_array::{DepthTextureArray, SHADOW_CASCADE_LAYERS, SHADOW_MAP_RESOLUTION};
pub use formats::{AttachmentFormat, TextureWrap};
pub use geometry::Geometry;
pub use lights::{
    DirectionalLightData, LightsUniform, PointLightData, SceneLights, SpotLightData,
};
pub use render_target::{
    AttachmentLayout, AttachmentSpec, ClearFlags, ClearValue, RenderTarget, RenderTargetSpec,
    MAX_COLOR_ATTACHMENTS,
};
pub use scene_renderer::{SceneRenderer, SceneShaders, SHADOW_MAP_SLOT};
pub use shader::{uniform_array_element, Shader, ShaderLoader, TextureBinding};
pub use skybox::Skybox;
pub use submit::DrawSubmitter;
