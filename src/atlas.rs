//! Walk-cycle sprite atlas
//!
//! Turns one still image into a horizontal strip of frames. Each frame is the
//! scaled source nudged by a small pixel offset, which reads as a bouncing,
//! staggering walk when played back. Purely cosmetic: nothing in the
//! simulation depends on the atlas existing.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::consts::{
    ATLAS_MIN_FRAME_HEIGHT, ATLAS_MIN_FRAME_WIDTH, ATLAS_TARGET_FRAME_HEIGHT, WALK_FRAME_COUNT,
    WALK_FRAME_OFFSETS,
};

/// Why an atlas could not be built
#[derive(thiserror::Error, Debug)]
pub enum AtlasError {
    #[error("Failed to decode sprite source: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Sprite source has no pixels")]
    Empty,
}

/// Pixel rectangle of one frame inside the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Immutable frame strip plus its geometry
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    frame_count: u32,
    frame_width: u32,
    frame_height: u32,
    strip: RgbaImage,
}

impl SpriteAtlas {
    /// Decode an encoded image (PNG/JPEG) and build the walk strip
    pub fn build(bytes: &[u8]) -> Result<Self, AtlasError> {
        let source = image::load_from_memory(bytes)?;
        if source.width() == 0 || source.height() == 0 {
            return Err(AtlasError::Empty);
        }
        let atlas = Self::from_image(&source);
        log::info!(
            "Sprite atlas built: {} frames of {}x{}",
            atlas.frame_count,
            atlas.frame_width,
            atlas.frame_height
        );
        Ok(atlas)
    }

    /// Build the strip from an already decoded image
    pub fn from_image(source: &DynamicImage) -> Self {
        let (frame_width, frame_height) = frame_size(source.width(), source.height());
        let scaled = imageops::resize(
            &source.to_rgba8(),
            frame_width,
            frame_height,
            FilterType::Triangle,
        );

        let mut strip = RgbaImage::new(frame_width * WALK_FRAME_COUNT, frame_height);
        for (i, &(dx, dy)) in WALK_FRAME_OFFSETS.iter().enumerate() {
            blit_offset(&mut strip, &scaled, i as u32 * frame_width, dx, dy);
        }

        Self {
            frame_count: WALK_FRAME_COUNT,
            frame_width,
            frame_height,
            strip,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// The packed strip, `frame_width * frame_count` wide
    pub fn strip(&self) -> &RgbaImage {
        &self.strip
    }

    /// Where frame `index` sits in the strip (wraps out-of-range indices)
    pub fn frame_rect(&self, index: u32) -> FrameRect {
        FrameRect {
            x: (index % self.frame_count) * self.frame_width,
            y: 0,
            width: self.frame_width,
            height: self.frame_height,
        }
    }
}

/// Scale to the target height keeping aspect, never below the floor size
fn frame_size(width: u32, height: u32) -> (u32, u32) {
    let scale = ATLAS_TARGET_FRAME_HEIGHT as f32 / height.max(1) as f32;
    let frame_width = ((width as f32 * scale).round() as u32).max(ATLAS_MIN_FRAME_WIDTH);
    let frame_height = ATLAS_TARGET_FRAME_HEIGHT.max(ATLAS_MIN_FRAME_HEIGHT);
    (frame_width, frame_height)
}

/// Copy `frame` into the cell starting at `cell_x`, shifted by (dx, dy).
/// Pixels shifted outside the cell are dropped; uncovered pixels stay clear.
fn blit_offset(strip: &mut RgbaImage, frame: &RgbaImage, cell_x: u32, dx: i32, dy: i32) {
    let (w, h) = frame.dimensions();
    for y in 0..h {
        for x in 0..w {
            let sx = x as i32 - dx;
            let sy = y as i32 - dy;
            if sx < 0 || sy < 0 || sx >= w as i32 || sy >= h as i32 {
                continue;
            }
            let pixel = *frame.get_pixel(sx as u32, sy as u32);
            strip.put_pixel(cell_x + x, y, pixel);
        }
    }
}
