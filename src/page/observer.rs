use crate::foundation::core::{ImageIndex, Rect, RoundedRectRadii, Vec2};

/// Read-only view of the page the effect decorates.
pub trait Page {
    /// Every image currently tagged for the effect, in document order.
    fn tagged_images(&self) -> Vec<ImageIndex>;

    /// Viewport-relative bounding rect, or `None` once the image left the page.
    fn image_rect(&self, image: ImageIndex) -> Option<Rect>;

    /// Current page scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Corner radii of the image's own border.
    fn border_radii(&self, image: ImageIndex) -> RoundedRectRadii;

    /// Whether the image has finished loading.
    fn is_loaded(&self, image: ImageIndex) -> bool;
}

/// Notification delivered to a running effect controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    /// A tagged image was inserted into the page.
    ImageInserted(ImageIndex),
    /// A tagged image finished loading.
    ImageLoaded(ImageIndex),
    /// A tagged image was taken off the page.
    ImageRemoved(ImageIndex),
    /// The viewport changed size.
    Resized,
    /// The page scrolled.
    Scrolled,
}
