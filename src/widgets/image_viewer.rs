//! Image viewer state (rendering-agnostic)
//!
//! Scale model: `fit_factor` shrinks the image into ~90% of the viewport
//! (never enlarging it), `user_scale` is the zoom on top of that. Scroll
//! offsets are in device pixels of the scaled image, like scrollbar values.

use crate::core::panel::ViewportControl;
use crate::recent_files::RecentFilesStore;
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Tunables for the scale model
#[derive(Debug, Clone, Copy)]
pub struct ZoomLimits {
    /// Share of the viewport the fitted image may occupy
    pub fit_ratio: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            fit_ratio: 0.9,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

/// Decoded image plus where it came from
pub struct LoadedImage {
    pub path: PathBuf,
    pub pixels: RgbaImage,
}

impl LoadedImage {
    pub fn decode(path: &Path) -> Result<Self> {
        let pixels = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?
            .to_rgba8();
        Ok(Self {
            path: path.to_path_buf(),
            pixels,
        })
    }

    pub fn size(&self) -> (f64, f64) {
        (
            f64::from(self.pixels.width()),
            f64::from(self.pixels.height()),
        )
    }
}

pub struct ImageViewerState {
    pub image: Option<LoadedImage>,
    pub fit_factor: f64,
    pub user_scale: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    /// Viewport size in device pixels
    pub viewport: (f64, f64),
    /// Images opened before, most recent last
    pub recent: Vec<PathBuf>,
    limits: ZoomLimits,
    store: Box<dyn RecentFilesStore>,
}

impl ImageViewerState {
    pub fn new(store: Box<dyn RecentFilesStore>, limits: ZoomLimits) -> Self {
        let recent = store.load().unwrap_or_else(|e| {
            warn!("Failed to load recent images: {:#}", e);
            Vec::new()
        });

        Self {
            image: None,
            fit_factor: 1.0,
            user_scale: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            viewport: (0.0, 0.0),
            recent,
            limits,
            store,
        }
    }

    pub fn effective_scale(&self) -> f64 {
        let scale = self.fit_factor * self.user_scale;
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }

    /// Size of the image at the current scale
    pub fn scaled_size(&self) -> Option<(f64, f64)> {
        let scale = self.effective_scale();
        self.image.as_ref().map(|img| {
            let (w, h) = img.size();
            (w * scale, h * scale)
        })
    }

    /// Largest valid scroll offsets
    pub fn scroll_range(&self) -> (f64, f64) {
        match self.scaled_size() {
            Some((w, h)) => (
                (w - self.viewport.0).max(0.0),
                (h - self.viewport.1).max(0.0),
            ),
            None => (0.0, 0.0),
        }
    }

    fn clamp_scroll(&mut self) {
        let (max_x, max_y) = self.scroll_range();
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }

    fn recompute_fit(&mut self) {
        let (vw, vh) = self.viewport;
        self.fit_factor = match &self.image {
            Some(img) if vw > 0.0 && vh > 0.0 => {
                let (iw, ih) = img.size();
                let fx = (vw * self.limits.fit_ratio).floor() / iw;
                let fy = (vh * self.limits.fit_ratio).floor() / ih;
                fx.min(fy).min(1.0)
            }
            _ => 1.0,
        };
    }

    /// Window resize: refit, keep the user's zoom
    pub fn set_viewport(&mut self, width: f64, height: f64) -> bool {
        if self.viewport == (width, height) {
            return false;
        }
        self.viewport = (width, height);
        self.recompute_fit();
        self.clamp_scroll();
        true
    }

    /// Zoom by `factor`, keeping the image point under `anchor` in place
    pub fn zoom(&mut self, factor: f64, anchor: (f64, f64)) {
        if self.image.is_none() {
            return;
        }

        // Anchor in original-image coordinates, from pre-zoom scale and scroll
        let old_scale = self.effective_scale();
        let orig_x = (self.scroll_x + anchor.0) / old_scale;
        let orig_y = (self.scroll_y + anchor.1) / old_scale;

        self.user_scale =
            (self.user_scale * factor).clamp(self.limits.min_scale, self.limits.max_scale);
        let new_scale = self.effective_scale();

        self.scroll_x = orig_x * new_scale - anchor.0;
        self.scroll_y = orig_y * new_scale - anchor.1;
        self.clamp_scroll();

        debug!(
            "Zoom x{:.3} -> user scale {:.3}, scroll ({:.1}, {:.1})",
            factor, self.user_scale, self.scroll_x, self.scroll_y
        );
    }

    pub fn viewport_center(&self) -> (f64, f64) {
        (self.viewport.0 / 2.0, self.viewport.1 / 2.0)
    }

    /// Replace the displayed image, refit, and reset zoom and scroll
    pub fn show(&mut self, image: LoadedImage) {
        self.image = Some(image);
        self.recompute_fit();
        self.user_scale = 1.0;
        self.scroll_x = 0.0;
        self.scroll_y = 0.0;
    }

    /// Decode and show `path`. On failure the current image stays.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let image = LoadedImage::decode(path)?;
        info!(
            "Opened image {:?} ({}x{})",
            path,
            image.pixels.width(),
            image.pixels.height()
        );
        self.show(image);
        self.remember(path);
        Ok(())
    }

    /// Open an entry of the recent list
    pub fn open_recent(&mut self, index: usize) -> Result<()> {
        let path = self
            .recent
            .get(index)
            .cloned()
            .context("No such recent image")?;
        self.open(&path)
    }

    fn remember(&mut self, path: &Path) {
        if self.recent.iter().any(|p| p == path) {
            return;
        }
        self.recent.push(path.to_path_buf());
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.recent) {
            warn!("Failed to save recent images: {:#}", e);
        }
    }

    /// User-initiated reset: forget the image and drop it from the recent list
    pub fn clear(&mut self) {
        if let Some(img) = self.image.take() {
            let before = self.recent.len();
            self.recent.retain(|p| p != &img.path);
            if self.recent.len() != before {
                self.persist();
            }
        }
        self.fit_factor = 1.0;
        self.user_scale = 1.0;
        self.scroll_x = 0.0;
        self.scroll_y = 0.0;
    }

    /// Pixel shown at viewport position (x, y), if the image covers it.
    /// Images smaller than the viewport are centred.
    pub fn sample(&self, x: f64, y: f64) -> Option<Rgba<u8>> {
        let img = self.image.as_ref()?;
        let (sw, sh) = self.scaled_size()?;
        let scale = self.effective_scale();

        let offset_x = ((self.viewport.0 - sw) / 2.0).max(0.0);
        let offset_y = ((self.viewport.1 - sh) / 2.0).max(0.0);

        let ix = (x - offset_x + self.scroll_x) / scale;
        let iy = (y - offset_y + self.scroll_y) / scale;
        if ix < 0.0 || iy < 0.0 {
            return None;
        }

        let (ix, iy) = (ix.floor() as u32, iy.floor() as u32);
        if ix >= img.pixels.width() || iy >= img.pixels.height() {
            return None;
        }
        Some(*img.pixels.get_pixel(ix, iy))
    }
}

impl ViewportControl for ImageViewerState {
    fn pan(&mut self, dx: f64, dy: f64) {
        self.scroll_x += dx;
        self.scroll_y += dy;
        self.clamp_scroll();
    }

    fn zoom_at_center(&mut self, factor: f64) {
        let center = self.viewport_center();
        self.zoom(factor, center);
    }
}
