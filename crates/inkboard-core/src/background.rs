//! Background reference pages and their pan offset.
//!
//! Pages are workspace state, not document content: nothing here takes part
//! in undo/redo.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// One raster page drawn behind the editable content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPage {
    /// Reference to the page image (URL, path or data URI).
    pub source: String,
    /// Pixel width.
    pub width: f64,
    /// Pixel height.
    pub height: f64,
}

impl BackgroundPage {
    pub fn new(source: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            source: source.into(),
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Ordered pages, the current page index and a pan offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundStore {
    pages: Vec<BackgroundPage>,
    current: usize,
    /// Offset applied to the displayed page, relative to its centered position.
    pan_offset: Vec2,
}

impl BackgroundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all pages and return to the first one.
    pub fn set_pages(&mut self, pages: Vec<BackgroundPage>) {
        log::debug!("Loaded {} background pages", pages.len());
        self.pages = pages;
        self.current = 0;
    }

    pub fn pages(&self) -> &[BackgroundPage] {
        &self.pages
    }

    pub fn has_pages(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the displayed page. Always 0 when there are no pages.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The displayed page, if any.
    pub fn current(&self) -> Option<&BackgroundPage> {
        self.pages.get(self.current)
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.pages.len()
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 0
    }

    /// Advance one page. Returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Go back one page. Returns false at the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to page `index`. Out-of-range requests are ignored.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            log::trace!("go_to_page({}) ignored, {} pages", index, self.pages.len());
            return false;
        }
        self.current = index;
        true
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    pub fn set_pan_offset(&mut self, offset: Vec2) {
        self.pan_offset = offset;
    }

    pub fn reset_pan(&mut self) {
        self.pan_offset = Vec2::ZERO;
    }

    /// Remove all pages and reset the index and pan offset.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.current = 0;
        self.reset_pan();
    }

    /// Offset that centers the current page in `viewport`.
    fn centering(&self, viewport: Size) -> Option<Vec2> {
        let page = self.current()?;
        Some(Vec2::new(
            (viewport.width - page.width) / 2.0,
            (viewport.height - page.height) / 2.0,
        ))
    }

    /// Rectangle the current page occupies on screen: centered in the
    /// viewport, then shifted by the pan offset.
    pub fn displayed_bounds(&self, viewport: Size) -> Option<Rect> {
        let page = self.current()?;
        let origin = Point::ZERO + self.centering(viewport)? + self.pan_offset;
        Some(Rect::from_origin_size(origin, page.size()))
    }

    /// Position of `point` relative to the displayed page's top-left corner,
    /// or `None` if it misses the page. Edges count as on the page.
    pub fn hit_test(&self, point: Point, viewport: Size) -> Option<Vec2> {
        let bounds = self.displayed_bounds(viewport)?;
        let on_page = point.x >= bounds.x0
            && point.x <= bounds.x1
            && point.y >= bounds.y0
            && point.y <= bounds.y1;
        on_page.then(|| point - bounds.origin())
    }

    /// Pan offset that puts the page point `grab` (relative to the page's
    /// top-left corner) under `pointer`.
    pub fn offset_for_drag(&self, pointer: Point, grab: Vec2, viewport: Size) -> Option<Vec2> {
        let centering = self.centering(viewport)?;
        Some(pointer.to_vec2() - grab - centering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: usize) -> BackgroundStore {
        let mut store = BackgroundStore::new();
        store.set_pages(
            (0..n)
                .map(|i| BackgroundPage::new(format!("page-{i}.png"), 400.0, 300.0))
                .collect(),
        );
        store
    }

    #[test]
    fn test_empty_store() {
        let store = BackgroundStore::new();
        assert!(!store.has_pages());
        assert!(store.current().is_none());
        assert!(!store.can_go_next());
        assert!(!store.can_go_prev());
        assert!(store.displayed_bounds(Size::new(800.0, 600.0)).is_none());
    }

    #[test]
    fn test_navigation_clamps() {
        let mut store = store_with(3);
        assert!(!store.prev_page());
        assert!(store.next_page());
        assert!(store.next_page());
        assert!(!store.next_page());
        assert_eq!(store.current_index(), 2);
        assert!(store.prev_page());
        assert_eq!(store.current_index(), 1);
    }

    #[test]
    fn test_go_to_page_out_of_range_is_noop() {
        let mut store = store_with(2);
        assert!(store.go_to_page(1));
        assert!(!store.go_to_page(2));
        assert_eq!(store.current_index(), 1);
    }

    #[test]
    fn test_set_pages_resets_index() {
        let mut store = store_with(3);
        store.go_to_page(2);
        store.set_pages(vec![BackgroundPage::new("a", 1.0, 1.0)]);
        assert_eq!(store.current_index(), 0);
        assert_eq!(store.page_count(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = store_with(3);
        store.go_to_page(2);
        store.set_pan_offset(Vec2::new(5.0, 5.0));
        store.clear();
        assert_eq!(store, BackgroundStore::new());
    }

    #[test]
    fn test_displayed_bounds_centered_with_offset() {
        let mut store = store_with(1);
        let viewport = Size::new(800.0, 600.0);
        assert_eq!(
            store.displayed_bounds(viewport),
            Some(Rect::new(200.0, 150.0, 600.0, 450.0))
        );
        store.set_pan_offset(Vec2::new(-50.0, 10.0));
        assert_eq!(
            store.displayed_bounds(viewport),
            Some(Rect::new(150.0, 160.0, 550.0, 460.0))
        );
        assert_eq!(
            store.hit_test(Point::new(151.0, 161.0), viewport),
            Some(Vec2::new(1.0, 1.0))
        );
        assert_eq!(store.hit_test(Point::new(100.0, 100.0), viewport), None);
    }

    #[test]
    fn test_hit_test_includes_edges() {
        let store = store_with(1);
        let viewport = Size::new(800.0, 600.0);
        assert_eq!(
            store.hit_test(Point::new(600.0, 450.0), viewport),
            Some(Vec2::new(400.0, 300.0))
        );
        assert_eq!(store.hit_test(Point::new(600.1, 450.0), viewport), None);
    }

    #[test]
    fn test_drag_keeps_grabbed_point_under_pointer() {
        let mut store = store_with(1);
        let viewport = Size::new(800.0, 600.0);
        let down = Point::new(250.0, 200.0);
        let grab = store.hit_test(down, viewport).unwrap();

        let pointer = Point::new(300.0, 260.0);
        let offset = store.offset_for_drag(pointer, grab, viewport).unwrap();
        store.set_pan_offset(offset);

        let origin = store.displayed_bounds(viewport).unwrap().origin();
        assert_eq!(origin + grab, pointer);
        assert_eq!(offset, Vec2::new(50.0, 60.0));
    }
}
