// Image provider: turns an identifier like "apple_mask" into decoded pixels.
// Visual expectation: `frame()` gives a buffer ready to push to the window,
// `image()` gives the raw RGBA pixels the mask sampler reads.

use crate::error::Error;
use crate::model::QuizStep;
use crate::types::FrameBuffer;
use image::RgbaImage;
use log::{error, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const ASSET_EXTENSION: &str = "png";

pub struct AssetStore {
    dir: PathBuf,
    cache: HashMap<String, RgbaImage>, // decoded once, reused every frame
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), cache: HashMap::new() }
    }

    pub fn path_of(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{ASSET_EXTENSION}"))
    }

    /// Decoded RGBA image for `id` (loaded from disk on first use).
    pub fn image(&mut self, id: &str) -> Result<&RgbaImage, Error> {
        if !self.cache.contains_key(id) {
            let img = decode(&self.path_of(id))?;
            self.cache.insert(id.to_string(), img);
        }
        self.cache
            .get(id)
            .ok_or_else(|| Error::Asset(format!("{id}: missing from cache")))
    }

    /// Image converted to 0x00RRGGBB, alpha composited over black.
    pub fn frame(&mut self, id: &str) -> Result<FrameBuffer, Error> {
        let img = self.image(id)?;
        let (w, h) = img.dimensions();
        let mut out = Vec::with_capacity((w as usize) * (h as usize));
        for (_x, _y, pixel) in img.enumerate_pixels() {
            // Each `pixel` is Rgba<u8>; premultiply so transparent areas read as black.
            let a = pixel[3] as u32;
            let r = pixel[0] as u32 * a / 255;
            let g = pixel[1] as u32 * a / 255;
            let b = pixel[2] as u32 * a / 255;
            out.push((r << 16) | (g << 8) | b);
        }
        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels: out })
    }

    /// Original and mask must be pixel-for-pixel aligned, or taps land on the wrong region.
    pub fn check_mask_fits(&mut self, original: &str, mask: &str) -> Result<(), Error> {
        let original_size = self.image(original)?.dimensions();
        let mask_size = self.image(mask)?.dimensions();
        if original_size != mask_size {
            return Err(Error::MaskSize(format!(
                "{original} is {}x{} but {mask} is {}x{}",
                original_size.0, original_size.1, mask_size.0, mask_size.1
            )));
        }
        Ok(())
    }

    /// Load every picture the deck references and check each question/mask pair.
    /// Problems are logged, not fatal: the quiz still runs with placeholders.
    /// Returns how many problems were found.
    pub fn preload(&mut self, steps: &[QuizStep]) -> usize {
        let mut problems = 0;
        for step in steps {
            for item in [&step.question, &step.answer, &step.explanation] {
                if let Err(e) = self.image(&item.image.original) {
                    error!("{e}");
                    problems += 1;
                }
            }
            if let Some(mask) = &step.question.image.mask {
                if let Err(e) = self.check_mask_fits(&step.question.image.original, &mask.mask) {
                    error!("{e}");
                    problems += 1;
                }
            }
        }
        info!("Preloaded {} images from {} ({problems} problems)", self.cache.len(), self.dir.display());
        problems
    }
}

fn decode(path: &Path) -> Result<RgbaImage, Error> {
    let img = image::open(path).map_err(|e| Error::Asset(format!("Open {}: {e}", path.display())))?;
    Ok(img.to_rgba8())
}
