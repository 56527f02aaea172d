use crate::{
    foundation::core::{ImageIndex, Rect, RoundedRectRadii, Vec2, square_corners},
    page::observer::Page,
};

/// One image held by a [`MemoryPage`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryImage {
    /// Viewport-relative rect.
    pub rect: Rect,
    pub radii: RoundedRectRadii,
    pub loaded: bool,
}

/// In-process page model. Image indices are slot positions and stay stable after a
/// removal.
#[derive(Clone, Debug, Default)]
pub struct MemoryPage {
    scroll: Vec2,
    images: Vec<Option<MemoryImage>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tagged image and return its index.
    pub fn insert_image(&mut self, rect: Rect, loaded: bool) -> ImageIndex {
        self.images.push(Some(MemoryImage {
            rect,
            radii: square_corners(),
            loaded,
        }));
        ImageIndex(self.images.len() - 1)
    }

    pub fn image(&self, image: ImageIndex) -> Option<&MemoryImage> {
        self.images.get(image.0).and_then(Option::as_ref)
    }

    fn image_mut(&mut self, image: ImageIndex) -> Option<&mut MemoryImage> {
        self.images.get_mut(image.0).and_then(Option::as_mut)
    }

    /// Returns `false` if the image is not on the page.
    pub fn set_loaded(&mut self, image: ImageIndex) -> bool {
        self.image_mut(image).map(|i| i.loaded = true).is_some()
    }

    pub fn set_image_rect(&mut self, image: ImageIndex, rect: Rect) -> bool {
        self.image_mut(image).map(|i| i.rect = rect).is_some()
    }

    pub fn set_radii(&mut self, image: ImageIndex, radii: RoundedRectRadii) -> bool {
        self.image_mut(image).map(|i| i.radii = radii).is_some()
    }

    pub fn remove_image(&mut self, image: ImageIndex) -> bool {
        self.images
            .get_mut(image.0)
            .and_then(Option::take)
            .is_some()
    }

    /// Set the scroll offset without moving any viewport rect, as for fixed-position
    /// images.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Scroll the document: every viewport rect moves opposite to the delta.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll += delta;
        for image in self.images.iter_mut().flatten() {
            image.rect = image.rect - delta;
        }
    }
}

impl Page for MemoryPage {
    fn tagged_images(&self) -> Vec<ImageIndex> {
        self.images
            .iter()
            .enumerate()
            .filter(|(_, i)| i.is_some())
            .map(|(idx, _)| ImageIndex(idx))
            .collect()
    }

    fn image_rect(&self, image: ImageIndex) -> Option<Rect> {
        self.image(image).map(|i| i.rect)
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn border_radii(&self, image: ImageIndex) -> RoundedRectRadii {
        self.image(image).map_or_else(square_corners, |i| i.radii)
    }

    fn is_loaded(&self, image: ImageIndex) -> bool {
        self.image(image).is_some_and(|i| i.loaded)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/memory.rs"]
mod tests;
