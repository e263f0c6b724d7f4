use std::path::{Path, PathBuf};

use eframe::egui;

use crate::persistence::PersistenceResult;

/// A decoded image ready to be uploaded as a texture.
#[derive(Clone)]
pub struct LoadedImage {
    pub name: String,
    pub path: Option<PathBuf>,
    /// Width and height in pixels.
    pub size: [usize; 2],
    /// Unmultiplied RGBA, row by row.
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("size", &self.size)
            .field("rgba", &format!("<{} bytes>", self.rgba.len()))
            .finish()
    }
}

impl LoadedImage {
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> PersistenceResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        log::debug!("Decoded image: {}x{}", size[0], size[1]);
        Ok(Self {
            name: name.into(),
            path: None,
            size,
            rgba: rgba.into_raw(),
        })
    }

    pub fn from_path(path: &Path) -> PersistenceResult<Self> {
        let bytes = std::fs::read(path)?;
        let mut image = Self::from_bytes(path.display().to_string(), &bytes)?;
        image.path = Some(path.to_path_buf());
        Ok(image)
    }

    pub fn size_vec2(&self) -> egui::Vec2 {
        egui::vec2(self.size[0] as f32, self.size[1] as f32)
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(self.size, &self.rgba)
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(mime: &str, path: Option<&Path>) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    path.and_then(Path::extension)
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

/// Picks up images dropped onto the window.
#[derive(Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect newly dropped files from the UI context.
    /// Returns true if there is anything to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Decode the dropped images. Only the last decodable image is returned,
    /// since the canvas holds one image at a time.
    pub fn process_dropped_files(&mut self) -> Option<LoadedImage> {
        let mut loaded = None;
        for file in std::mem::take(&mut self.dropped_files) {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if !is_image_file(&file.mime, file.path.as_deref()) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }

            let result = if let Some(bytes) = &file.bytes {
                log::info!("Processing image from memory: {} ({} bytes)", file_name, bytes.len());
                LoadedImage::from_bytes(file_name.clone(), bytes)
            } else if let Some(path) = &file.path {
                log::info!("Processing image from path: {}", path.display());
                LoadedImage::from_path(path)
            } else {
                log::warn!("Dropped file has no accessible data: {}", file_name);
                continue;
            };

            match result {
                Ok(image) => loaded = Some(image),
                Err(err) => log::error!("Failed to load {}: {}", file_name, err),
            }
        }
        loaded
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let text = ctx.input(|i| {
            let mut text = "Dropping image:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(screen_rect.center(), Align2::CENTER_CENTER, text, FontId::proportional(20.0), Color32::WHITE);
    }
}
