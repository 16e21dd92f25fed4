// renderer/render_target.rs
// Off-screen multi-attachment render targets.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::context::GpuContext;
use super::depth_array::{DepthTextureArray, SHADOW_CASCADE_LAYERS};
use super::formats::{self, AttachmentFormat, TextureWrap};
use super::readback::{self, TexelRegion};
use super::shader::{Shader, TextureBinding};

pub const MAX_COLOR_ATTACHMENTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSpec {
    pub format: AttachmentFormat,
    #[serde(default = "default_wrap")]
    pub wrap: TextureWrap,
}

fn default_wrap() -> TextureWrap {
    TextureWrap::ClampToEdge
}

impl AttachmentSpec {
    pub fn new(format: AttachmentFormat) -> Self {
        Self {
            format,
            wrap: default_wrap(),
        }
    }

    pub fn with_wrap(mut self, wrap: TextureWrap) -> Self {
        self.wrap = wrap;
        self
    }
}

impl From<AttachmentFormat> for AttachmentSpec {
    fn from(format: AttachmentFormat) -> Self {
        Self::new(format)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderTargetSpec {
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    pub attachments: Vec<AttachmentSpec>,
}

impl RenderTargetSpec {
    pub fn new<A>(width: u32, height: u32, attachments: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<AttachmentSpec>,
    {
        Self {
            width,
            height,
            samples: 1,
            attachments: attachments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples.max(1);
        self
    }
}

/// Attachments of a spec split into ordered color slots and the depth slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachmentLayout {
    pub color: Vec<AttachmentSpec>,
    pub depth: Option<AttachmentSpec>,
}

impl AttachmentLayout {
    /// Panics on more than [`MAX_COLOR_ATTACHMENTS`] color attachments,
    /// a second depth attachment or an unrecognized format.
    pub fn from_spec(spec: &RenderTargetSpec) -> Self {
        let mut layout = Self::default();

        for attachment in &spec.attachments {
            if attachment.format.is_depth() {
                assert!(
                    layout.depth.is_none(),
                    "Only one depth attachment supported"
                );
                layout.depth = Some(*attachment);
            } else if attachment.format.is_color() {
                layout.color.push(*attachment);
            } else {
                panic!("Unrecognized attachment format {:?}", attachment.format);
            }
        }

        assert!(
            layout.color.len() <= MAX_COLOR_ATTACHMENTS,
            "Only {} color attachments supported, got {}",
            MAX_COLOR_ATTACHMENTS,
            layout.color.len()
        );

        layout
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_empty() && self.depth.is_none()
    }

    /// Index of the first integer-id color attachment.
    pub fn integer_attachment_index(&self) -> Option<usize> {
        self.color.iter().position(|a| a.format.is_integer())
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearValue {
    /// For `RedInteger` attachments.
    Int(i32),
    Color(wgpu::Color),
}

#[derive(Debug)]
struct ColorAttachment {
    spec: AttachmentSpec,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: Option<wgpu::Sampler>,
}

#[derive(Debug)]
struct DepthAttachment {
    format: wgpu::TextureFormat,
    view: wgpu::TextureView,
}

/// Depth target of a pass together with its stencil handling.
struct DepthTarget<'a> {
    view: &'a wgpu::TextureView,
    has_stencil: bool,
}

/// Framebuffer with up to four color attachments and one depth attachment.
///
/// `bind` opens a render pass over every attachment; dropping the pass ends it.
/// All clears are recorded as their own passes so attachments outside the
/// clear keep their contents.
#[derive(Debug)]
pub struct RenderTarget {
    context: GpuContext,
    spec: RenderTargetSpec,
    layout: AttachmentLayout,
    color_attachments: Vec<ColorAttachment>,
    depth_attachment: Option<DepthAttachment>,
    depth_array: Option<DepthTextureArray>,
}

impl RenderTarget {
    pub fn new(context: &GpuContext, spec: RenderTargetSpec) -> Self {
        let layout = AttachmentLayout::from_spec(&spec);
        let mut target = Self {
            context: context.clone(),
            spec,
            layout,
            color_attachments: Vec::new(),
            depth_attachment: None,
            depth_array: None,
        };
        target.invalidate();
        target
    }

    /// Reallocates every attachment from the current spec.
    pub fn invalidate(&mut self) {
        self.layout = AttachmentLayout::from_spec(&self.spec);
        assert!(
            !self.layout.is_empty(),
            "Render target needs at least one attachment"
        );

        push_validation_scope(&self.context.device);

        let device = &self.context.device;
        let size = wgpu::Extent3d {
            width: self.spec.width,
            height: self.spec.height,
            depth_or_array_layers: 1,
        };
        let samples = self.spec.samples.max(1);
        let supports_border = self.context.supports_border_clamp();

        self.color_attachments = self
            .layout
            .color
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                create_color_attachment(device, *spec, index, size, samples, supports_border)
            })
            .collect();

        // An attached cascade array owns the depth slot.
        self.depth_attachment = match self.depth_array {
            Some(_) => None,
            None => self
                .layout
                .depth
                .map(|spec| create_depth_attachment(device, spec, size, samples)),
        };

        pop_validation_scope(&self.context.device);

        log::debug!(
            "Built render target {}x{} ({} color, depth: {}, samples: {})",
            self.spec.width,
            self.spec.height,
            self.color_attachments.len(),
            self.depth_attachment.is_some(),
            samples
        );
    }

    /// Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Attempted to resize render target to {}, {}", width, height);
            return;
        }

        self.spec.width = width;
        self.spec.height = height;
        self.invalidate();
    }

    /// Replaces the depth attachment with a cascade depth texture array.
    ///
    /// Color output is disabled for passes over this target from then on,
    /// and the array keeps its fixed resolution across rebuilds.
    pub fn attach_depth_texture(&mut self) -> DepthTextureArray {
        let array = DepthTextureArray::cascades(&self.context.device);
        self.depth_array = Some(array.clone());
        self.depth_attachment = None;
        array
    }

    /// Like [`attach_depth_texture`](Self::attach_depth_texture) with a custom square resolution.
    pub fn attach_depth_texture_with_size(&mut self, size: u32) -> DepthTextureArray {
        let array = DepthTextureArray::new(
            &self.context.device,
            "CascadeShadowMap",
            SHADOW_CASCADE_LAYERS,
            size,
        );
        self.depth_array = Some(array.clone());
        self.depth_attachment = None;
        array
    }

    pub fn depth_texture_array(&self) -> Option<&DepthTextureArray> {
        self.depth_array.as_ref()
    }

    /// Begins a pass writing to every attachment, viewport set to the target size.
    pub fn bind<'e>(&self, encoder: &'e mut wgpu::CommandEncoder) -> wgpu::RenderPass<'e> {
        match &self.depth_array {
            Some(_) => self.bind_layer(encoder, 0),
            None => {
                let color = self.color_views(wgpu::LoadOp::Load);
                let depth = self.depth_attachment.as_ref().map(|depth| DepthTarget {
                    view: &depth.view,
                    has_stencil: depth.format.has_stencil_aspect(),
                });
                let mut pass = begin_pass(encoder, "RenderTarget Pass", &color, depth, None);
                pass.set_viewport(
                    0.0,
                    0.0,
                    self.spec.width as f32,
                    self.spec.height as f32,
                    0.0,
                    1.0,
                );
                pass
            }
        }
    }

    /// Begins a depth-only pass into one layer of the attached depth texture array.
    pub fn bind_layer<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        layer: u32,
    ) -> wgpu::RenderPass<'e> {
        let Some(array) = &self.depth_array else {
            panic!("No depth texture array attached");
        };
        let depth = DepthTarget {
            view: array.layer_view(layer),
            has_stencil: false,
        };
        let mut pass = begin_pass(encoder, "RenderTarget Layer Pass", &[], Some(depth), None);
        let size = array.size() as f32;
        pass.set_viewport(0.0, 0.0, size, size, 0.0, 1.0);
        pass
    }

    /// Clears all color attachments to `color` and/or depth to 1.0 and stencil to 0.
    pub fn clear(&self, encoder: &mut wgpu::CommandEncoder, flags: ClearFlags, color: wgpu::Color) {
        if flags.contains(ClearFlags::COLOR) && self.depth_array.is_none() {
            let views = self.color_views(wgpu::LoadOp::Clear(color));
            if !views.is_empty() {
                begin_pass(encoder, "RenderTarget Clear Color", &views, None, None);
            }
        }

        if flags.contains(ClearFlags::DEPTH) {
            self.clear_depth_attachment(encoder);
        }
    }

    /// Clears one color attachment, leaving the others untouched.
    pub fn clear_attachment(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        attachment_index: usize,
        value: ClearValue,
    ) {
        let attachment = self.color_attachment(attachment_index);

        let color = match value {
            ClearValue::Int(v) => {
                assert!(
                    attachment.spec.format.is_integer(),
                    "Integer clear value requires a RedInteger attachment"
                );
                wgpu::Color {
                    r: f64::from(v),
                    g: 0.0,
                    b: 0.0,
                    a: 0.0,
                }
            }
            ClearValue::Color(color) => {
                assert!(
                    !attachment.spec.format.is_integer(),
                    "Color clear value requires a non-integer attachment"
                );
                color
            }
        };

        let view = [color_attachment(&attachment.view, wgpu::LoadOp::Clear(color))];
        begin_pass(encoder, "RenderTarget Clear Attachment", &view, None, None);
    }

    /// Resets depth to 1.0 and stencil to 0; covers every layer of an attached array.
    pub fn clear_depth_attachment(&self, encoder: &mut wgpu::CommandEncoder) {
        if let Some(array) = &self.depth_array {
            for layer in 0..array.layer_count() {
                let depth = DepthTarget {
                    view: array.layer_view(layer),
                    has_stencil: false,
                };
                begin_pass(
                    encoder,
                    "RenderTarget Clear Depth Layer",
                    &[],
                    Some(depth),
                    Some(1.0),
                );
            }
            return;
        }

        match &self.depth_attachment {
            Some(depth) => {
                let target = DepthTarget {
                    view: &depth.view,
                    has_stencil: depth.format.has_stencil_aspect(),
                };
                begin_pass(
                    encoder,
                    "RenderTarget Clear Depth",
                    &[],
                    Some(target),
                    Some(1.0),
                );
            }
            None => log::warn!("Render target has no depth attachment to clear"),
        }
    }

    /// Hands a color attachment to `shader` as a sampled texture at `slot`.
    pub fn bind_color_attachment(&self, attachment_index: usize, slot: u32, shader: &dyn Shader) {
        let attachment = self.color_attachment(attachment_index);
        let sample_type = formats::sample_type(attachment.spec.format)
            .unwrap_or(wgpu::TextureSampleType::Float { filterable: false });

        shader.bind_texture(
            slot,
            TextureBinding {
                view: attachment.view.clone(),
                sampler: attachment.sampler.clone(),
                sample_type,
                dimension: wgpu::TextureViewDimension::D2,
                multisampled: self.spec.samples > 1,
            },
        );
    }

    pub fn bind_depth_texture_array(
        &self,
        array: &DepthTextureArray,
        slot: u32,
        shader: &dyn Shader,
    ) {
        shader.bind_texture(
            slot,
            TextureBinding {
                view: array.array_view().clone(),
                sampler: Some(array.sampler().clone()),
                sample_type: wgpu::TextureSampleType::Depth,
                dimension: wgpu::TextureViewDimension::D2Array,
                multisampled: false,
            },
        );
    }

    /// Reads one texel of a `RedInteger` attachment. `(0, 0)` is the top-left corner.
    ///
    /// Blocks until the GPU is idle; submit the frame before calling.
    pub fn read_pixel_int(&self, attachment_index: usize, x: u32, y: u32) -> i32 {
        let bytes = self.read_texel(attachment_index, x, y, AttachmentFormat::RedInteger);
        bytemuck::pod_read_unaligned(&bytes[..4])
    }

    /// Reads one texel of an `Rgba8` attachment. `(0, 0)` is the top-left corner.
    pub fn read_pixel_color(&self, attachment_index: usize, x: u32, y: u32) -> [u8; 4] {
        let bytes = self.read_texel(attachment_index, x, y, AttachmentFormat::Rgba8);
        [bytes[0], bytes[1], bytes[2], bytes[3]]
    }

    /// Copies a whole `Rgba8` attachment into an image.
    pub fn capture_color_attachment(&self, attachment_index: usize) -> image::RgbaImage {
        let attachment = self.color_attachment(attachment_index);
        assert_eq!(
            attachment.spec.format,
            AttachmentFormat::Rgba8,
            "Can capture only Rgba8 attachments"
        );
        self.assert_single_sample();

        let (width, height) = (self.spec.width, self.spec.height);
        let pixels = readback::read_texture_region(
            &self.context,
            &attachment.texture,
            attachment.spec.format.texel_size(),
            TexelRegion::full(width, height),
        );

        image::RgbaImage::from_fn(width, height, |x, y| {
            let offset = ((y * width + x) * 4) as usize;
            image::Rgba([
                pixels[offset],
                pixels[offset + 1],
                pixels[offset + 2],
                pixels[offset + 3],
            ])
        })
    }

    pub fn spec(&self) -> &RenderTargetSpec {
        &self.spec
    }

    pub fn layout(&self) -> &AttachmentLayout {
        &self.layout
    }

    pub fn width(&self) -> u32 {
        self.spec.width
    }

    pub fn height(&self) -> u32 {
        self.spec.height
    }

    pub fn color_attachment_count(&self) -> usize {
        self.color_attachments.len()
    }

    /// True for a plain per-target depth texture. A target holding a cascade
    /// array reports false; see [`depth_texture_array`](Self::depth_texture_array).
    pub fn has_depth_attachment(&self) -> bool {
        self.depth_attachment.is_some()
    }

    pub fn color_attachment_texture(&self, attachment_index: usize) -> &wgpu::Texture {
        &self.color_attachment(attachment_index).texture
    }

    pub fn color_attachment_format(&self, attachment_index: usize) -> AttachmentFormat {
        self.color_attachment(attachment_index).spec.format
    }

    pub fn integer_attachment_index(&self) -> Option<usize> {
        self.layout.integer_attachment_index()
    }

    fn color_attachment(&self, attachment_index: usize) -> &ColorAttachment {
        assert!(
            attachment_index < self.color_attachments.len(),
            "Index {} exceeds number of color attachments ({})",
            attachment_index,
            self.color_attachments.len()
        );
        &self.color_attachments[attachment_index]
    }

    fn color_views(
        &self,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> Vec<Option<wgpu::RenderPassColorAttachment<'_>>> {
        self.color_attachments
            .iter()
            .map(|attachment| color_attachment(&attachment.view, load))
            .collect()
    }

    fn assert_single_sample(&self) {
        assert!(
            self.spec.samples <= 1,
            "Cannot read back a multisampled render target"
        );
    }

    fn read_texel(
        &self,
        attachment_index: usize,
        x: u32,
        y: u32,
        expected: AttachmentFormat,
    ) -> Vec<u8> {
        let attachment = self.color_attachment(attachment_index);
        assert_eq!(
            attachment.spec.format, expected,
            "Attachment {} is {:?}, expected {:?}",
            attachment_index, attachment.spec.format, expected
        );
        self.assert_single_sample();
        assert!(
            x < self.spec.width && y < self.spec.height,
            "Pixel ({}, {}) outside {}x{} render target",
            x,
            y,
            self.spec.width,
            self.spec.height
        );

        readback::read_texture_region(
            &self.context,
            &attachment.texture,
            expected.texel_size(),
            TexelRegion::texel(x, y),
        )
    }
}

fn color_attachment(
    view: &wgpu::TextureView,
    load: wgpu::LoadOp<wgpu::Color>,
) -> Option<wgpu::RenderPassColorAttachment<'_>> {
    Some(wgpu::RenderPassColorAttachment {
        view,
        depth_slice: None,
        resolve_target: None,
        ops: wgpu::Operations {
            load,
            store: wgpu::StoreOp::Store,
        },
    })
}

/// `clear_depth` of `None` loads existing depth and stencil.
fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    label: &str,
    color: &[Option<wgpu::RenderPassColorAttachment<'_>>],
    depth: Option<DepthTarget<'_>>,
    clear_depth: Option<f32>,
) -> wgpu::RenderPass<'e> {
    let depth_stencil_attachment = depth.map(|depth| {
        let (depth_load, stencil_load) = match clear_depth {
            Some(value) => (wgpu::LoadOp::Clear(value), wgpu::LoadOp::Clear(0)),
            None => (wgpu::LoadOp::Load, wgpu::LoadOp::Load),
        };
        wgpu::RenderPassDepthStencilAttachment {
            view: depth.view,
            depth_ops: Some(wgpu::Operations {
                load: depth_load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: depth.has_stencil.then_some(wgpu::Operations {
                load: stencil_load,
                store: wgpu::StoreOp::Store,
            }),
        }
    });

    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: color,
        depth_stencil_attachment,
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}

fn create_color_attachment(
    device: &wgpu::Device,
    spec: AttachmentSpec,
    index: usize,
    size: wgpu::Extent3d,
    samples: u32,
    supports_border: bool,
) -> ColorAttachment {
    let Some(format) = formats::texture_format(spec.format) else {
        panic!("Unrecognized color attachment format {:?}", spec.format);
    };

    let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
    if samples == 1 {
        usage |= wgpu::TextureUsages::COPY_SRC;
    }

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&format!("RenderTarget Color {index}")),
        size,
        mip_level_count: 1,
        sample_count: samples,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    // Multisampled textures are loaded texel by texel and take no sampler.
    let sampler = (samples == 1).then(|| {
        let address_mode = formats::address_mode(spec.wrap, supports_border)
            .unwrap_or(wgpu::AddressMode::ClampToEdge);
        let filter = formats::filter_mode(spec.format);
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("RenderTarget Color {index} Sampler")),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            border_color: (address_mode == wgpu::AddressMode::ClampToBorder)
                .then_some(wgpu::SamplerBorderColor::TransparentBlack),
            ..Default::default()
        })
    });

    ColorAttachment {
        spec,
        texture,
        view,
        sampler,
    }
}

fn create_depth_attachment(
    device: &wgpu::Device,
    spec: AttachmentSpec,
    size: wgpu::Extent3d,
    samples: u32,
) -> DepthAttachment {
    let Some(format) = formats::texture_format(spec.format) else {
        panic!("Unrecognized depth attachment format {:?}", spec.format);
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("RenderTarget Depth"),
        size,
        mip_level_count: 1,
        sample_count: samples,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    DepthAttachment { format, view }
}

#[cfg(not(target_arch = "wasm32"))]
fn push_validation_scope(device: &wgpu::Device) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
}

#[cfg(not(target_arch = "wasm32"))]
fn pop_validation_scope(device: &wgpu::Device) {
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        panic!("Render target is incomplete: {err}");
    }
}

// Error scopes resolve asynchronously on the web; validation errors surface
// through the device's uncaptured error handler instead.
#[cfg(target_arch = "wasm32")]
fn push_validation_scope(_device: &wgpu::Device) {}

#[cfg(target_arch = "wasm32")]
fn pop_validation_scope(_device: &wgpu::Device) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(formats: &[AttachmentFormat]) -> RenderTargetSpec {
        RenderTargetSpec::new(1280, 720, formats.iter().copied())
    }

    #[test]
    fn layout_preserves_color_order_and_extracts_depth() {
        let layout = AttachmentLayout::from_spec(&spec(&[
            AttachmentFormat::Rgba8,
            AttachmentFormat::Depth24Stencil8,
            AttachmentFormat::RedInteger,
        ]));

        let formats: Vec<_> = layout.color.iter().map(|a| a.format).collect();
        assert_eq!(
            formats,
            vec![AttachmentFormat::Rgba8, AttachmentFormat::RedInteger]
        );
        assert_eq!(
            layout.depth.map(|a| a.format),
            Some(AttachmentFormat::Depth24Stencil8)
        );
        assert_eq!(layout.integer_attachment_index(), Some(1));
    }

    #[test]
    fn depth_only_layout_has_no_color() {
        let layout = AttachmentLayout::from_spec(&spec(&[AttachmentFormat::Depth32]));
        assert!(layout.color.is_empty());
        assert!(layout.depth.is_some());
        assert!(!layout.is_empty());
        assert_eq!(layout.integer_attachment_index(), None);
    }

    #[test]
    fn four_color_attachments_are_accepted() {
        let layout = AttachmentLayout::from_spec(&spec(&[AttachmentFormat::Rgba8; 4]));
        assert_eq!(layout.color.len(), MAX_COLOR_ATTACHMENTS);
    }

    #[test]
    #[should_panic(expected = "color attachments supported")]
    fn more_than_four_color_attachments_are_rejected() {
        AttachmentLayout::from_spec(&spec(&[AttachmentFormat::Rgba8; 5]));
    }

    #[test]
    #[should_panic(expected = "one depth attachment")]
    fn second_depth_attachment_is_rejected() {
        AttachmentLayout::from_spec(&spec(&[
            AttachmentFormat::Depth32,
            AttachmentFormat::Depth24Stencil8,
        ]));
    }

    #[test]
    #[should_panic(expected = "Unrecognized attachment format")]
    fn none_format_is_rejected() {
        AttachmentLayout::from_spec(&spec(&[AttachmentFormat::None]));
    }

    #[test]
    fn attachment_spec_defaults_to_edge_clamp() {
        let attachment = AttachmentSpec::from(AttachmentFormat::RedInteger);
        assert_eq!(attachment.wrap, TextureWrap::ClampToEdge);
        let attachment = attachment.with_wrap(TextureWrap::ClampToBorder);
        assert_eq!(attachment.wrap, TextureWrap::ClampToBorder);
    }

    #[test]
    fn sample_count_is_at_least_one() {
        let spec = spec(&[AttachmentFormat::Rgba8]).with_samples(0);
        assert_eq!(spec.samples, 1);
    }

    #[test]
    fn clear_flags_combine() {
        let flags = ClearFlags::COLOR | ClearFlags::DEPTH;
        assert!(flags.contains(ClearFlags::COLOR));
        assert!(flags.contains(ClearFlags::DEPTH));
        assert!(!ClearFlags::COLOR.contains(ClearFlags::DEPTH));
    }
}
