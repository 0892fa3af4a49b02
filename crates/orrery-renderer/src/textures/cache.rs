use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::gpu::RendererError;

/// Largest edge kept after decoding; bigger images are downscaled.
pub const MAX_TEXTURE_EDGE: u32 = 4096;

/// Handle to a decoded image in a [`TextureCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Decoded images keyed by their path relative to an asset root.
#[derive(Debug, Default)]
pub struct TextureCache {
    root: PathBuf,
    images: Vec<RgbaImage>,
    by_path: HashMap<String, Option<TextureId>>,
}

impl TextureCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: Vec::new(),
            by_path: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load `rel` once, returning `None` when it is empty or unreadable.
    ///
    /// Failures are cached so a missing file warns only once.
    pub fn load(&mut self, rel: &str) -> Option<TextureId> {
        if rel.is_empty() {
            return None;
        }
        if let Some(cached) = self.by_path.get(rel) {
            return *cached;
        }

        let result = match self.try_load(rel) {
            Ok(image) => {
                debug!(path = rel, width = image.width(), height = image.height(), "texture loaded");
                Some(self.push(image))
            }
            Err(e) => {
                warn!("{e}; using flat color");
                None
            }
        };
        self.by_path.insert(rel.to_string(), result);
        result
    }

    /// Decode `rel` without caching.
    pub fn try_load(&self, rel: &str) -> Result<RgbaImage, RendererError> {
        let path = self.root.join(rel);
        let image = image::open(&path).map_err(|e| RendererError::TextureLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(RendererError::TextureLoad {
                path: path.display().to_string(),
                reason: "image has no pixels".into(),
            });
        }

        if width.max(height) > MAX_TEXTURE_EDGE {
            let factor = MAX_TEXTURE_EDGE as f32 / width.max(height) as f32;
            let new_w = ((width as f32 * factor) as u32).max(1);
            let new_h = ((height as f32 * factor) as u32).max(1);
            debug!(path = rel, width, height, new_w, new_h, "downscaling texture");
            let resized = image.resize_exact(new_w, new_h, image::imageops::FilterType::Triangle);
            return Ok(resized.to_rgba8());
        }

        Ok(image.to_rgba8())
    }

    /// Register an already decoded image.
    pub fn insert(&mut self, name: &str, image: RgbaImage) -> TextureId {
        let id = self.push(image);
        self.by_path.insert(name.to_string(), Some(id));
        id
    }

    pub fn get(&self, id: TextureId) -> Option<&RgbaImage> {
        self.images.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &RgbaImage)> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, image)| (TextureId(i as u32), image))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn push(&mut self, image: RgbaImage) -> TextureId {
        let id = TextureId(self.images.len() as u32);
        self.images.push(image);
        id
    }
}
