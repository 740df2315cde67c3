use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::canvas::CanvasDimensions;
use crate::error::{PersistenceError, PersistenceResult};
use crate::raster::{CanvasImage, ImageRef};

/// Size of a stored raster, kept next to the pixels so a reload can size
/// the canvas before decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasMetadata {
    pub width: u32,
    pub height: u32,
    /// Seconds since the UNIX epoch
    pub saved_at: u64,
}

/// A PNG-encoded canvas raster plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCanvas {
    pub metadata: CanvasMetadata,
    pub png: Vec<u8>,
}

impl StoredCanvas {
    pub fn encode(raster: &RgbaImage) -> PersistenceResult<Self> {
        let mut png = Vec::new();
        raster.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(Self {
            metadata: CanvasMetadata {
                width: raster.width(),
                height: raster.height(),
                saved_at: timestamp_secs(),
            },
            png,
        })
    }

    pub fn dimensions(&self) -> CanvasDimensions {
        CanvasDimensions::new(self.metadata.width, self.metadata.height)
    }

    pub fn decode(&self) -> PersistenceResult<ImageRef> {
        Ok(CanvasImage::decode(&self.png)?)
    }
}

fn timestamp_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Durable storage for the session canvas
pub trait CanvasStore {
    fn save(&mut self, key: &str, canvas: StoredCanvas) -> PersistenceResult<()>;

    fn load(&self, key: &str) -> PersistenceResult<StoredCanvas>;
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    canvases: HashMap<String, StoredCanvas>,
    saves: usize,
}

/// Session-storage style store. Clones share the same contents, so one
/// handle can outlive an editor session and seed the next.
#[derive(Debug, Clone, Default)]
pub struct MemoryCanvasStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryCanvasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.inner.lock().saves
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().canvases.contains_key(key)
    }
}

impl CanvasStore for MemoryCanvasStore {
    fn save(&mut self, key: &str, canvas: StoredCanvas) -> PersistenceResult<()> {
        let mut inner = self.inner.lock();
        inner.canvases.insert(key.to_owned(), canvas);
        inner.saves += 1;
        Ok(())
    }

    fn load(&self, key: &str) -> PersistenceResult<StoredCanvas> {
        self.inner
            .lock()
            .canvases
            .get(key)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(key.to_owned()))
    }
}

/// Stores `<key>.png` and `<key>.json` in a directory
#[derive(Debug, Clone)]
pub struct FileCanvasStore {
    dir: PathBuf,
}

impl FileCanvasStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn image_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.png", key))
    }

    fn metadata_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CanvasStore for FileCanvasStore {
    fn save(&mut self, key: &str, canvas: StoredCanvas) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.image_path(key), &canvas.png)?;
        let json = serde_json::to_string_pretty(&canvas.metadata)?;
        fs::write(self.metadata_path(key), json)?;
        debug!("Saved canvas '{}' to {}", key, self.dir.display());
        Ok(())
    }

    fn load(&self, key: &str) -> PersistenceResult<StoredCanvas> {
        let metadata_path = self.metadata_path(key);
        if !metadata_path.exists() {
            return Err(PersistenceError::NotFound(key.to_owned()));
        }
        let metadata = serde_json::from_str(&fs::read_to_string(metadata_path)?)?;
        let png = fs::read(self.image_path(key))?;
        Ok(StoredCanvas { metadata, png })
    }
}
