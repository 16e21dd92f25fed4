// renderer/readback.rs
// Blocking texture-to-CPU copies used for picking and captures.

use super::context::GpuContext;

/// A rectangle of texels in a single-sample 2D texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TexelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TexelRegion {
    pub fn texel(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            width: 1,
            height: 1,
        }
    }

    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Rows in a copy destination must be padded to `COPY_BYTES_PER_ROW_ALIGNMENT`.
pub fn padded_bytes_per_row(width: u32, texel_size: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * texel_size).div_ceil(align) * align
}

/// Copies `region` of `texture` into host memory, tightly packed row by row.
///
/// Stalls the calling thread until the GPU has finished every previously
/// submitted command, so the result reflects all frames submitted before the call.
pub fn read_texture_region(
    context: &GpuContext,
    texture: &wgpu::Texture,
    texel_size: u32,
    region: TexelRegion,
) -> Vec<u8> {
    let unpadded = region.width * texel_size;
    let padded = padded_bytes_per_row(region.width, texel_size);

    let staging = context.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Staging Buffer"),
        size: u64::from(padded) * u64::from(region.height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = context
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Readback Encoder"),
        });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: region.x,
                y: region.y,
                z: 0,
            },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(region.height),
            },
        },
        wgpu::Extent3d {
            width: region.width,
            height: region.height,
            depth_or_array_layers: 1,
        },
    );

    context.queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    if let Err(err) = context.device.poll(wgpu::PollType::wait_indefinitely()) {
        panic!("Device poll failed during readback: {err}");
    }

    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(err)) => panic!("Failed to map readback buffer: {err}"),
        Err(_) => panic!("Readback buffer was never mapped"),
    }

    let mut pixels = Vec::with_capacity((unpadded * region.height) as usize);
    {
        let mapped = slice.get_mapped_range();
        for row in mapped.chunks_exact(padded as usize) {
            pixels.extend_from_slice(&row[..unpadded as usize]);
        }
    }
    staging.unmap();

    pixels
}
