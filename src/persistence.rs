use std::fs;
use std::path::{Path, PathBuf};

use egui::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::Canvas;
use crate::shape::{Shape, ShapeRecord, MAX_POINTS};

/// Errors that can occur while reading or writing annotation data
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize annotations: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid annotation data: {0}")]
    InvalidData(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The annotations of one image, detached from any live canvas.
///
/// Built from a canvas in one step, so it can be written to disk on another
/// thread while editing goes on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationFile {
    /// Version of the application that wrote the file
    pub version: String,
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    pub image_size: Vec2,
    #[serde(default)]
    pub verified: bool,
    pub shapes: Vec<ShapeRecord>,
}

impl AnnotationFile {
    pub fn from_canvas(canvas: &Canvas, image_path: Option<PathBuf>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            image_path,
            image_size: canvas.image_size(),
            verified: canvas.verified(),
            shapes: canvas.shapes().iter().map(Shape::to_record).collect(),
        }
    }

    /// Where annotations for `image_path` live: same name, `.json` extension.
    pub fn path_for_image(image_path: &Path) -> PathBuf {
        image_path.with_extension("json")
    }

    pub fn save(&self, path: &Path) -> PersistenceResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Saved {} shapes to {}", self.shapes.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> PersistenceResult<Self> {
        let json = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&json)?;
        file.validate()?;
        if file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Annotation file version {} differs from current version {}",
                file.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Ok(file)
    }

    /// Every stored shape must be a full quadrilateral.
    pub fn validate(&self) -> PersistenceResult<()> {
        for (index, record) in self.shapes.iter().enumerate() {
            if record.points.len() != MAX_POINTS {
                return Err(PersistenceError::InvalidData(format!(
                    "shape {index} ({:?}) has {} points, expected {MAX_POINTS}",
                    record.label,
                    record.points.len()
                )));
            }
        }
        Ok(())
    }

    pub fn to_shapes(&self) -> Vec<Shape> {
        self.shapes.iter().map(Shape::from_record).collect()
    }

    /// Load the stored shapes and verified flag into `canvas`. Nothing is
    /// touched unless every shape is a full quadrilateral.
    pub fn apply_to(&self, canvas: &mut Canvas) -> PersistenceResult<()> {
        self.validate()?;
        if canvas.image_size() != self.image_size {
            log::warn!(
                "Annotations were made on a {:?} image, canvas holds {:?}",
                self.image_size,
                canvas.image_size()
            );
        }
        canvas.load_shapes(self.to_shapes());
        canvas.set_verified(self.verified);
        Ok(())
    }
}
