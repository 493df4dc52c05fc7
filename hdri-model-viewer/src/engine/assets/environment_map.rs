use std::f32::consts::PI;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
};
use half::f16;
use image::ImageFormat;

use crate::error::{AssetError, AssetResult};

/// Largest finite half float; brighter texels (the sun) are clamped to it.
const F16_MAX: f32 = 65504.0;

/// Linear RGB equirectangular panorama, row 0 at the zenith.
#[derive(Debug, Clone, PartialEq)]
pub struct EquirectImage {
    width: u32,
    height: u32,
    texels: Vec<[f32; 3]>,
}

impl EquirectImage {
    pub fn new(width: u32, height: u32, texels: Vec<[f32; 3]>) -> AssetResult<Self> {
        if width == 0 || height == 0 || texels.len() != (width as usize) * (height as usize) {
            return Err(AssetError::InvalidDimensions {
                width,
                height,
                texels: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Decode a Radiance `.hdr` file.
    pub fn decode_hdr(bytes: &[u8]) -> AssetResult<Self> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Hdr)
            .map_err(|err| AssetError::Decode(err.to_string()))?
            .into_rgb32f();
        let (width, height) = decoded.dimensions();
        let texels = decoded.pixels().map(|pixel| pixel.0).collect();
        Self::new(width, height, texels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: usize, y: usize) -> [f32; 3] {
        self.texels[y * self.width as usize + x]
    }

    /// Bilinear sample in the direction `dir`. Longitude wraps, latitude clamps.
    pub fn sample(&self, dir: Vec3) -> [f32; 3] {
        let dir = dir.normalize_or_zero();
        let u = dir.z.atan2(dir.x) / (2.0 * PI) + 0.5;
        let v = 0.5 - dir.y.clamp(-1.0, 1.0).asin() / PI;

        // Continuous pixel space with texel centres on half-integers
        let px = u * self.width as f32 - 0.5;
        let py = v * self.height as f32 - 0.5;

        let x0 = px.floor();
        let y0 = py.floor();
        let wx = px - x0;
        let wy = py - y0;

        let w = self.width as i64;
        let max_y = self.height as i64 - 1;
        let wrap_x = |x: i64| x.rem_euclid(w) as usize;
        let clamp_y = |y: i64| y.clamp(0, max_y) as usize;

        let (x0, y0) = (x0 as i64, y0 as i64);
        let c00 = self.texel(wrap_x(x0), clamp_y(y0));
        let c10 = self.texel(wrap_x(x0 + 1), clamp_y(y0));
        let c01 = self.texel(wrap_x(x0), clamp_y(y0 + 1));
        let c11 = self.texel(wrap_x(x0 + 1), clamp_y(y0 + 1));

        let mut out = [0.0; 3];
        for (channel, value) in out.iter_mut().enumerate() {
            let top = c00[channel] * (1.0 - wx) + c10[channel] * wx;
            let bottom = c01[channel] * (1.0 - wx) + c11[channel] * wx;
            *value = top * (1.0 - wy) + bottom * wy;
        }
        out
    }

    /// Box filter down by `factor` in both directions.
    pub fn downsample(&self, factor: u32) -> Self {
        let factor = factor.max(1);
        let width = (self.width / factor).max(1);
        let height = (self.height / factor).max(1);
        let mut texels = Vec::with_capacity((width * height) as usize);

        for y in 0..height {
            let y_start = y * factor;
            let y_end = ((y + 1) * factor).min(self.height);
            for x in 0..width {
                let x_start = x * factor;
                let x_end = ((x + 1) * factor).min(self.width);

                let mut sum = [0.0f32; 3];
                let mut count = 0.0f32;
                for sy in y_start..y_end {
                    for sx in x_start..x_end {
                        let texel = self.texel(sx as usize, sy as usize);
                        sum[0] += texel[0];
                        sum[1] += texel[1];
                        sum[2] += texel[2];
                        count += 1.0;
                    }
                }
                texels.push(sum.map(|channel| channel / count.max(1.0)));
            }
        }

        Self {
            width,
            height,
            texels,
        }
    }
}

/// Cube faces in +X, -X, +Y, -Y, +Z, -Z order, each `size * size` row-major texels.
#[derive(Debug, Clone, PartialEq)]
pub struct CubemapFaces {
    pub size: u32,
    pub texels: Vec<[f32; 3]>,
}

impl CubemapFaces {
    /// Resample an equirectangular panorama onto the six faces of a cube.
    pub fn from_equirect(source: &EquirectImage, size: u32) -> Self {
        let size = size.max(1);
        let mut texels = Vec::with_capacity(6 * (size * size) as usize);

        for face in 0..6 {
            for y in 0..size {
                for x in 0..size {
                    let u = 2.0 * (x as f32 + 0.5) / size as f32 - 1.0;
                    let v = 2.0 * (y as f32 + 0.5) / size as f32 - 1.0;
                    texels.push(source.sample(face_direction(face, u, v)));
                }
            }
        }

        Self { size, texels }
    }

    /// Texels of face `index`, row-major.
    pub fn face(&self, index: usize) -> &[[f32; 3]] {
        let face_len = (self.size * self.size) as usize;
        &self.texels[index * face_len..(index + 1) * face_len]
    }

    /// Halve the face resolution with a 2x2 box filter.
    pub fn downsample(&self) -> Self {
        let src = self.size as usize;
        let size = (self.size / 2).max(1);
        let dst = size as usize;
        let mut texels = Vec::with_capacity(6 * dst * dst);

        for face in 0..6 {
            let source = self.face(face);
            for y in 0..dst {
                for x in 0..dst {
                    let mut sum = [0.0f32; 3];
                    let mut count = 0.0f32;
                    for sy in (y * 2)..(y * 2 + 2).min(src) {
                        for sx in (x * 2)..(x * 2 + 2).min(src) {
                            let texel = source[sy * src + sx];
                            sum[0] += texel[0];
                            sum[1] += texel[1];
                            sum[2] += texel[2];
                            count += 1.0;
                        }
                    }
                    texels.push(sum.map(|channel| channel / count.max(1.0)));
                }
            }
        }

        Self { size, texels }
    }

    /// This level followed by successively halved levels down to 1x1.
    pub fn mip_chain(&self) -> Vec<Self> {
        let mut levels = vec![self.clone()];
        loop {
            let last = &levels[levels.len() - 1];
            if last.size <= 1 {
                break;
            }
            let next = last.downsample();
            levels.push(next);
        }
        levels
    }

    /// Pack as `Rgba16Float` texel data with opaque alpha.
    pub fn to_rgba16f_bytes(&self) -> Vec<u8> {
        pack_rgba16f(&self.texels)
    }

    /// Build a single-level cube-view GPU image from these faces.
    pub fn to_cube_image(&self) -> Image {
        cube_image(std::slice::from_ref(self))
    }

    /// Build a cube-view GPU image with a full mip chain. Rougher surfaces read
    /// the blurrier levels.
    pub fn to_mipmapped_cube_image(&self) -> Image {
        cube_image(&self.mip_chain())
    }
}

fn pack_rgba16f(texels: &[[f32; 3]]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(texels.len() * 8);
    for texel in texels {
        for channel in [texel[0], texel[1], texel[2], 1.0] {
            let value = channel.clamp(0.0, F16_MAX);
            bytes.extend_from_slice(&f16::from_f32(value).to_le_bytes());
        }
    }
    bytes
}

// Texel data is layer major: every mip of face 0, then every mip of face 1, and so on
fn cube_image(levels: &[CubemapFaces]) -> Image {
    let Some(base) = levels.first() else {
        return Image::default();
    };

    let mut image = Image::new(
        Extent3d {
            width: base.size,
            height: base.size,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        base.to_rgba16f_bytes(),
        TextureFormat::Rgba16Float,
        RenderAssetUsages::RENDER_WORLD,
    );

    if levels.len() > 1 {
        let mut data = Vec::new();
        for face in 0..6 {
            for level in levels {
                data.extend(pack_rgba16f(level.face(face)));
            }
        }
        image.data = Some(data);
        image.texture_descriptor.mip_level_count = levels.len() as u32;
    }

    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    image
}

/// World direction through face texel `(u, v)`, both in `[-1, 1]` with `v` running down the face.
fn face_direction(face: usize, u: f32, v: f32) -> Vec3 {
    match face {
        0 => Vec3::new(1.0, -v, -u),
        1 => Vec3::new(-1.0, -v, u),
        2 => Vec3::new(u, 1.0, v),
        3 => Vec3::new(u, -1.0, -v),
        4 => Vec3::new(u, -v, 1.0),
        _ => Vec3::new(-u, -v, -1.0),
    }
}

/// Specular radiance plus a blurred low-resolution cube for diffuse lighting.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentCubemaps {
    pub specular: CubemapFaces,
    pub diffuse: CubemapFaces,
}

impl EnvironmentCubemaps {
    pub fn from_equirect(source: &EquirectImage, specular_size: u32, diffuse_size: u32) -> Self {
        let specular = CubemapFaces::from_equirect(source, specular_size);

        // Average down to a handful of texels per diffuse face texel before resampling
        let factor = source.width() / (diffuse_size.max(1) * 4);
        let blurred = source.downsample(factor);
        let diffuse = CubemapFaces::from_equirect(&blurred, diffuse_size);

        Self { specular, diffuse }
    }

    /// Decode an HDR file and build both cubemaps. The panorama is dropped afterwards.
    pub fn from_hdr_bytes(
        bytes: &[u8],
        specular_size: u32,
        diffuse_size: u32,
    ) -> AssetResult<Self> {
        let panorama = EquirectImage::decode_hdr(bytes)?;
        debug!(
            "Decoded {}x{} environment panorama",
            panorama.width(),
            panorama.height()
        );
        Ok(Self::from_equirect(&panorama, specular_size, diffuse_size))
    }
}
