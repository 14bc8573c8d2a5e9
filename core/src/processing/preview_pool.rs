use crate::inference::RawImage;
use std::collections::BTreeSet;

/// Displayable handle for one selected image.
///
/// Handles are not `Clone`; the only way to give one back is
/// [`PreviewPool::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    id: u64,
    filename: String,
    byte_len: usize,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

/// Tracks every preview handle that is currently acquired.
#[derive(Debug, Default)]
pub struct PreviewPool {
    live: BTreeSet<u64>,
    next_id: u64,
}

impl PreviewPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, image: &RawImage) -> PreviewHandle {
        self.next_id += 1;
        self.live.insert(self.next_id);
        PreviewHandle {
            id: self.next_id,
            filename: image.filename.clone(),
            byte_len: image.bytes.len(),
        }
    }

    /// Returns `false` if the handle was not outstanding.
    pub fn release(&mut self, handle: PreviewHandle) -> bool {
        self.live.remove(&handle.id)
    }

    pub fn outstanding(&self) -> usize {
        self.live.len()
    }
}

/// The current image selection together with its preview handles.
#[derive(Debug, Default)]
pub struct ImageSelection {
    images: Vec<RawImage>,
    previews: Vec<PreviewHandle>,
}

impl ImageSelection {
    /// Swaps in a new selection wholesale. Every handle of the previous
    /// selection goes back to the pool before the new ones are acquired.
    pub fn replace(&mut self, images: Vec<RawImage>, pool: &mut PreviewPool) {
        for handle in self.previews.drain(..) {
            pool.release(handle);
        }
        self.previews = images.iter().map(|image| pool.acquire(image)).collect();
        self.images = images;
    }

    pub fn clear(&mut self, pool: &mut PreviewPool) {
        self.replace(Vec::new(), pool);
    }

    pub fn images(&self) -> &[RawImage] {
        &self.images
    }

    pub fn previews(&self) -> &[PreviewHandle] {
        &self.previews
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }
}
