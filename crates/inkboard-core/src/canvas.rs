//! Canvas: the editing engine facade.
//!
//! [`Canvas`] owns every store (document, selection, background pages,
//! tools, history) and is the only type the presentation shell talks to.
//! Committed mutations go through the document first and are then recorded
//! in history; selection changes, page navigation and panning are not.

use crate::background::{BackgroundPage, BackgroundStore};
use crate::config::EngineConfig;
use crate::document::CanvasDocument;
use crate::error::EngineResult;
use crate::history::{History, Snapshot};
use crate::input::{HitTarget, Modifiers, PointerEvent};
use crate::selection::SelectionManager;
use crate::shapes::{SerializableColor, Shape, ShapeId, ShapeKind, Stroke, StrokeId, Transform};
use crate::tools::{DrawingAttributes, Effect, GestureContext, Tool, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};
use serde::Serialize;

/// Background page state as seen by a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct BackgroundState<'a> {
    pub pages: &'a [BackgroundPage],
    pub current_index: usize,
    pub pan_offset: Vec2,
    /// Where the current page is drawn, if there is one.
    pub displayed_bounds: Option<Rect>,
    pub can_go_next: bool,
    pub can_go_prev: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasState<'a> {
    pub strokes: &'a [Stroke],
    /// The stroke currently being drawn.
    pub in_progress_stroke: Option<&'a Stroke>,
    pub shapes: &'a [Shape],
    pub selected_shape_ids: &'a [ShapeId],
    pub selected_stroke_ids: &'a [StrokeId],
    pub marquee: Option<Rect>,
    /// Padded outline around the selection.
    pub selection_bounds: Option<Rect>,
    pub tool: Tool,
    pub attributes: DrawingAttributes,
    pub can_undo: bool,
    pub can_redo: bool,
    pub background: BackgroundState<'a>,
}

/// The editing engine.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: CanvasDocument,
    selection: SelectionManager,
    background: BackgroundStore,
    tools: ToolManager,
    history: History,
    config: EngineConfig,
    /// Viewport size.
    viewport_size: Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a canvas from `config`.
    ///
    /// History starts with a snapshot of the empty canvas so the first edit
    /// can be undone.
    pub fn with_config(config: EngineConfig) -> Self {
        let attributes = DrawingAttributes {
            color: config.brush_color,
            width: config.brush_width,
        };
        let mut canvas = Self {
            document: CanvasDocument::new(),
            selection: SelectionManager::new(),
            background: BackgroundStore::new(),
            tools: ToolManager::new(attributes),
            history: History::new(config.history_capacity),
            viewport_size: config.viewport,
            config,
        };
        canvas.record_history();
        canvas
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn background(&self) -> &BackgroundStore {
        &self.background
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    // --- Tools and drawing attributes ---

    pub fn tool(&self) -> Tool {
        self.tools.current_tool()
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tools.set_tool(tool) {
            self.selection.cancel_marquee();
        }
        log::debug!("Tool set to {}", tool);
    }

    /// Switch tools by name (`"pen"`, `"eraser"` or `"select"`).
    pub fn set_tool_by_name(&mut self, name: &str) -> EngineResult<()> {
        let tool = name.parse::<Tool>().inspect_err(|e| log::warn!("{}", e))?;
        self.set_tool(tool);
        Ok(())
    }

    pub fn attributes(&self) -> DrawingAttributes {
        self.tools.attributes
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.tools.attributes.color = color;
    }

    /// Set the brush color from a CSS hex string.
    pub fn set_color_hex(&mut self, color: &str) -> EngineResult<()> {
        let color = SerializableColor::from_hex(color).inspect_err(|e| log::warn!("{}", e))?;
        self.set_color(color);
        Ok(())
    }

    /// Set the brush width. Non-positive or non-finite widths are ignored.
    pub fn set_brush_width(&mut self, width: f64) {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("Ignoring brush width {}", width);
            return;
        }
        self.tools.attributes.width = width;
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, position: Point, hit: HitTarget) {
        self.handle(PointerEvent::Down { position, hit });
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.handle(PointerEvent::Move { position });
    }

    pub fn pointer_up(&mut self) {
        self.handle(PointerEvent::Up);
    }

    /// Run a pointer event through the active tool and apply its effects.
    pub fn handle(&mut self, event: PointerEvent) {
        let ctx = GestureContext {
            background: &self.background,
            viewport: self.viewport_size,
            min_point_distance: self.config.min_point_distance,
        };
        let effects = self.tools.handle(event, &ctx);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::CommitStroke(stroke) => {
                self.document.commit_stroke(stroke);
            }
            Effect::BeginMarquee(point) => self.selection.begin_marquee(point),
            Effect::UpdateMarquee(point) => self.selection.update_marquee(point),
            Effect::CommitMarquee => self.selection.commit_marquee(&self.document),
            Effect::SetPanOffset(offset) => self.background.set_pan_offset(offset),
            Effect::PushHistory => self.commit(),
        }
    }

    /// The stroke being drawn, if any.
    pub fn in_progress_stroke(&self) -> Option<&Stroke> {
        self.tools.gesture().in_progress_stroke()
    }

    // --- Selection ---

    /// Select a shape clicked in the renderer. Shift or ctrl toggles it
    /// instead of replacing the selection. Ignored unless the select tool is
    /// active or if the shape no longer exists.
    pub fn click_shape(&mut self, id: ShapeId, modifiers: Modifiers) -> bool {
        if self.tool() != Tool::Select || self.document.get_shape(id).is_none() {
            return false;
        }
        self.selection.select_shape(id, modifiers.is_multi_select());
        true
    }

    /// Select a stroke clicked in the renderer, mirroring [`Self::click_shape`].
    pub fn click_stroke(&mut self, id: StrokeId, modifiers: Modifiers) -> bool {
        if self.tool() != Tool::Select || self.document.get_stroke(id).is_none() {
            return false;
        }
        self.selection.select_stroke(id, modifiers.is_multi_select());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    /// Padded outline around the current selection.
    pub fn selection_bounds(&self) -> Option<Rect> {
        self.selection
            .compute_bounding_box(&self.document, self.config.selection_padding)
    }

    // --- Content mutations ---

    /// Add a toolbar shape with default geometry in the current color.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let id = self
            .document
            .add_shape(kind, self.tools.attributes.color, &self.config);
        self.commit();
        id
    }

    /// Add a shape by its type tag.
    pub fn add_shape_by_name(&mut self, kind: &str) -> EngineResult<ShapeId> {
        let kind = kind.parse::<ShapeKind>().inspect_err(|e| log::warn!("{}", e))?;
        Ok(self.add_shape(kind))
    }

    pub fn add_text(&mut self, content: impl Into<String>, position: Point) -> ShapeId {
        let id = self.document.add_text(
            content.into(),
            position,
            self.tools.attributes.color,
            &self.config,
        );
        self.commit();
        id
    }

    pub fn add_image(&mut self, source: impl Into<String>, position: Point) -> ShapeId {
        let id = self.document.add_image(
            source.into(),
            position,
            self.tools.attributes.color,
            &self.config,
        );
        self.commit();
        id
    }

    /// A shape drag finished at `position`.
    pub fn shape_drag_end(&mut self, id: ShapeId, position: Point) -> bool {
        let moved = self.document.move_shape(id, position);
        if moved {
            self.commit();
        }
        moved
    }

    /// A shape resize/rotate finished with `transform`.
    pub fn shape_transform_end(&mut self, id: ShapeId, transform: Transform) -> bool {
        let changed = self.document.transform_shape(id, &transform);
        if changed {
            self.commit();
        }
        changed
    }

    /// A stroke drag finished, moved by `delta`.
    pub fn stroke_drag_end(&mut self, id: StrokeId, delta: Vec2) -> bool {
        let moved = self.document.translate_stroke(id, delta);
        if moved {
            self.commit();
        }
        moved
    }

    /// A stroke resize/rotate finished with `transform`.
    pub fn stroke_transform_end(&mut self, id: StrokeId, transform: Transform) -> bool {
        let changed = self.document.transform_stroke(id, &transform);
        if changed {
            self.commit();
        }
        changed
    }

    /// Delete every selected shape and stroke and clear the selection.
    /// Returns whether anything was removed.
    pub fn delete_selected(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let removed = self.document.delete_shapes(self.selection.shape_ids())
            + self.document.delete_strokes(self.selection.stroke_ids());
        self.selection.clear_selection();
        if removed > 0 {
            log::debug!("Deleted {} selected items", removed);
            self.commit();
        }
        removed > 0
    }

    // --- History ---

    fn capture(&self) -> Snapshot {
        Snapshot::new(
            self.document.strokes.clone(),
            self.document.shapes.clone(),
            self.selection.shape_ids().to_vec(),
            self.selection.stroke_ids().to_vec(),
        )
    }

    fn record_history(&mut self) -> bool {
        let snapshot = self.capture();
        self.history.record(snapshot)
    }

    /// Record a committed mutation.
    fn commit(&mut self) {
        self.history.note_mutation();
        self.record_history();
    }

    /// Record the current state. Suppressed right after undo/redo until the
    /// next edit.
    pub fn snapshot(&mut self) -> bool {
        self.record_history()
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.document.strokes = snapshot.strokes;
        self.document.shapes = snapshot.shapes;
        self.selection
            .set(snapshot.selected_shape_ids, snapshot.selected_stroke_ids);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the last committed mutation. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Redo the last undone mutation. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    // --- Background pages ---

    /// Replace the background pages and show the first one.
    pub fn set_pages(&mut self, pages: Vec<BackgroundPage>) {
        self.background.set_pages(pages);
    }

    pub fn next_page(&mut self) -> bool {
        self.background.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.background.prev_page()
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        self.background.go_to_page(index)
    }

    pub fn set_pan_offset(&mut self, offset: Vec2) {
        self.background.set_pan_offset(offset);
    }

    pub fn reset_pan(&mut self) {
        self.background.reset_pan();
    }

    // --- Whole-canvas ---

    /// Reset content, selection, pages, gesture and history.
    pub fn clear(&mut self) {
        log::debug!("Clearing canvas");
        self.tools.cancel();
        self.document.clear();
        self.selection = SelectionManager::new();
        self.background.clear();
        self.history.clear();
        self.record_history();
    }

    /// Read-only view of the whole engine for rendering.
    pub fn state(&self) -> CanvasState<'_> {
        CanvasState {
            strokes: &self.document.strokes,
            in_progress_stroke: self.in_progress_stroke(),
            shapes: &self.document.shapes,
            selected_shape_ids: self.selection.shape_ids(),
            selected_stroke_ids: self.selection.stroke_ids(),
            marquee: self.selection.marquee(),
            selection_bounds: self.selection_bounds(),
            tool: self.tool(),
            attributes: self.attributes(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            background: BackgroundState {
                pages: self.background.pages(),
                current_index: self.background.current_index(),
                pan_offset: self.background.pan_offset(),
                displayed_bounds: self.background.displayed_bounds(self.viewport_size),
                can_go_next: self.background.can_go_next(),
                can_go_prev: self.background.can_go_prev(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::shapes::DrawMode;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn draw(canvas: &mut Canvas, points: &[(f64, f64)]) {
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            canvas.pointer_down(Point::new(x, y), HitTarget::Nothing);
        }
        for &(x, y) in iter {
            canvas.pointer_move(Point::new(x, y));
        }
        canvas.pointer_up();
    }

    const PLAIN: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..PLAIN
    };

    fn marquee(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) {
        canvas.pointer_down(Point::new(from.0, from.1), HitTarget::Nothing);
        canvas.pointer_move(Point::new(to.0, to.1));
        canvas.pointer_up();
    }

    #[test]
    fn test_new_canvas() {
        init();
        let canvas = Canvas::new();
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.tool(), Tool::Pen);
        assert!(!canvas.can_undo());
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_with_config() {
        let config = EngineConfig {
            brush_width: 5.0,
            brush_color: SerializableColor::new(1, 2, 3, 255),
            ..Default::default()
        };
        let canvas = Canvas::with_config(config);
        assert!((canvas.attributes().width - 5.0).abs() < f64::EPSILON);
        assert_eq!(canvas.attributes().color, SerializableColor::new(1, 2, 3, 255));
    }

    #[test]
    fn test_invalid_tool_is_rejected() {
        let mut canvas = Canvas::new();
        let err = canvas.set_tool_by_name("lasso").unwrap_err();
        assert!(matches!(err, EngineError::InvalidTool(_)));
        assert_eq!(canvas.tool(), Tool::Pen);
        canvas.set_tool_by_name("select").unwrap();
        assert_eq!(canvas.tool(), Tool::Select);
    }

    #[test]
    fn test_invalid_shape_type_is_rejected() {
        let mut canvas = Canvas::new();
        let err = canvas.add_shape_by_name("hexagon").unwrap_err();
        assert!(matches!(err, EngineError::InvalidShapeType(_)));
        assert!(canvas.document().is_empty());
        assert!(!canvas.can_undo());

        canvas.add_shape_by_name("star").unwrap();
        assert_eq!(canvas.document().shapes[0].kind(), ShapeKind::Star);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let mut canvas = Canvas::new();
        assert!(canvas.set_color_hex("blue").is_err());
        assert_eq!(canvas.attributes().color, SerializableColor::black());
        canvas.set_color_hex("#00ff00").unwrap();
        assert_eq!(canvas.attributes().color, SerializableColor::new(0, 255, 0, 255));
    }

    #[test]
    fn test_brush_width_validation() {
        let mut canvas = Canvas::new();
        canvas.set_brush_width(-1.0);
        canvas.set_brush_width(f64::NAN);
        assert!((canvas.attributes().width - 2.0).abs() < f64::EPSILON);
        canvas.set_brush_width(8.0);
        assert!((canvas.attributes().width - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_uses_brush_color() {
        let mut canvas = Canvas::new();
        canvas.set_color(SerializableColor::new(200, 0, 0, 255));
        let id = canvas.add_shape(ShapeKind::Circle);
        let shape = canvas.document().get_shape(id).unwrap();
        assert_eq!(shape.style().fill_color, SerializableColor::new(200, 0, 0, 255));
        assert!(canvas.selection().is_empty());
        assert!(canvas.can_undo());
    }

    #[test]
    fn test_draw_stroke_with_style() {
        init();
        let mut canvas = Canvas::new();
        canvas.set_color(SerializableColor::new(0, 0, 255, 255));
        canvas.set_brush_width(4.0);
        draw(&mut canvas, &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);

        let strokes = &canvas.document().strokes;
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].len(), 3);
        let blue = SerializableColor::new(0, 0, 255, 255);
        assert!(strokes[0]
            .points
            .iter()
            .all(|p| p.color == blue && (p.width - 4.0).abs() < f64::EPSILON));
        assert!(canvas.in_progress_stroke().is_none());
        assert!(canvas.can_undo());
    }

    #[test]
    fn test_erase_stroke_keeps_mode_after_tool_change() {
        let mut canvas = Canvas::new();
        canvas.set_tool(Tool::Eraser);
        draw(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        canvas.set_tool(Tool::Pen);

        let stroke = &canvas.document().strokes[0];
        assert_eq!(stroke.mode(), DrawMode::Erase);
        assert_eq!(stroke.points[0].color, SerializableColor::white());
    }

    #[test]
    fn test_decimation_through_facade() {
        let mut canvas = Canvas::new();
        canvas.pointer_down(Point::new(0.0, 0.0), HitTarget::Nothing);
        for i in 1..20 {
            canvas.pointer_move(Point::new(i as f64 * 0.1, 0.0));
        }
        assert_eq!(canvas.in_progress_stroke().map(Stroke::len), Some(1));
        canvas.pointer_up();
        assert_eq!(canvas.document().strokes[0].len(), 1);
    }

    #[test]
    fn test_tool_change_cancels_stroke() {
        let mut canvas = Canvas::new();
        canvas.pointer_down(Point::new(0.0, 0.0), HitTarget::Nothing);
        canvas.pointer_move(Point::new(10.0, 10.0));
        canvas.set_tool(Tool::Select);
        canvas.pointer_up();
        assert!(canvas.document().strokes.is_empty());
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_tool_change_cancels_marquee() {
        let mut canvas = Canvas::new();
        canvas.set_tool(Tool::Select);
        canvas.pointer_down(Point::new(0.0, 0.0), HitTarget::Nothing);
        canvas.pointer_move(Point::new(50.0, 50.0));
        assert!(canvas.state().marquee.is_some());
        canvas.set_tool(Tool::Pen);
        assert!(canvas.state().marquee.is_none());
    }

    #[test]
    fn test_idempotent_delete() {
        let mut canvas = Canvas::new();
        canvas.add_shape(ShapeKind::Rectangle);
        let id = canvas.add_shape(ShapeKind::Triangle);
        canvas.set_tool(Tool::Select);

        assert!(canvas.click_shape(id, PLAIN));
        assert!(canvas.delete_selected());
        let once = canvas.document().clone();

        assert!(!canvas.click_shape(id, PLAIN));
        assert!(!canvas.delete_selected());
        assert_eq!(canvas.document(), &once);
    }

    #[test]
    fn test_selection_exclusivity() {
        let mut canvas = Canvas::new();
        draw(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        let shape = canvas.add_shape(ShapeKind::Rectangle);
        canvas.set_tool(Tool::Select);

        assert!(canvas.click_stroke(StrokeId(0), PLAIN));
        assert!(canvas.click_shape(shape, PLAIN));
        assert_eq!(canvas.selection().shape_ids(), &[shape]);
        assert!(canvas.selection().stroke_ids().is_empty());
    }

    #[test]
    fn test_multi_click_switches_kind() {
        let mut canvas = Canvas::new();
        draw(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        draw(&mut canvas, &[(20.0, 0.0), (30.0, 10.0)]);
        let shape = canvas.add_shape(ShapeKind::Rectangle);
        canvas.set_tool(Tool::Select);

        canvas.click_stroke(StrokeId(0), PLAIN);
        let ctrl = Modifiers {
            ctrl: true,
            ..PLAIN
        };
        canvas.click_stroke(StrokeId(1), ctrl);
        assert_eq!(canvas.selection().stroke_ids(), &[StrokeId(0), StrokeId(1)]);

        canvas.click_shape(shape, SHIFT);
        assert_eq!(canvas.selection().shape_ids(), &[shape]);
        assert!(canvas.selection().stroke_ids().is_empty());

        // Meta alone replaces rather than toggles.
        let meta = Modifiers {
            meta: true,
            ..PLAIN
        };
        canvas.click_stroke(StrokeId(0), meta);
        canvas.click_stroke(StrokeId(1), meta);
        assert_eq!(canvas.selection().stroke_ids(), &[StrokeId(1)]);
    }

    #[test]
    fn test_clicks_ignored_outside_select_tool() {
        let mut canvas = Canvas::new();
        let shape = canvas.add_shape(ShapeKind::Rectangle);
        assert!(!canvas.click_shape(shape, PLAIN));
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_select_down_on_content_starts_no_marquee() {
        let mut canvas = Canvas::new();
        let shape = canvas.add_shape(ShapeKind::Rectangle);
        canvas.set_tool(Tool::Select);
        canvas.pointer_down(Point::new(150.0, 150.0), HitTarget::Shape(shape));
        canvas.pointer_move(Point::new(170.0, 180.0));
        assert!(canvas.state().marquee.is_none());
        canvas.pointer_up();
        canvas.click_shape(shape, PLAIN);
        assert_eq!(canvas.selection().shape_ids(), &[shape]);
    }

    #[test]
    fn test_select_drag_on_shape_over_page_pans() {
        let mut canvas = Canvas::new();
        // The page covers the whole 800x600 viewport.
        canvas.set_pages(vec![BackgroundPage::new("p.png", 800.0, 600.0)]);
        let rect = canvas.add_shape(ShapeKind::Rectangle);
        canvas.set_tool(Tool::Select);

        canvas.pointer_down(Point::new(150.0, 150.0), HitTarget::Shape(rect));
        canvas.pointer_move(Point::new(170.0, 180.0));
        assert!(canvas.state().marquee.is_none());
        canvas.pointer_up();

        assert_eq!(canvas.background().pan_offset(), Vec2::new(20.0, 30.0));
        assert!(canvas.state().marquee.is_none());
        assert_eq!(
            canvas.document().get_shape(rect).map(Shape::position),
            Some(Point::new(100.0, 100.0))
        );
    }

    #[test]
    fn test_marquee_containment_vs_overlap() {
        let mut canvas = Canvas::new();
        draw(&mut canvas, &[(10.0, 10.0), (40.0, 40.0)]);
        draw(&mut canvas, &[(60.0, 10.0), (300.0, 10.0)]);
        let shape = canvas.add_shape(ShapeKind::Rectangle);
        canvas.set_tool(Tool::Select);
        let entries = canvas.history.len();

        marquee(&mut canvas, (0.0, 0.0), (120.0, 120.0));

        assert_eq!(canvas.selection().shape_ids(), &[shape]);
        assert_eq!(canvas.selection().stroke_ids(), &[StrokeId(0)]);
        assert!(canvas.state().marquee.is_none());
        // Selection is not undoable content.
        assert_eq!(canvas.history.len(), entries);
    }

    #[test]
    fn test_selection_bounds_padded() {
        let mut canvas = Canvas::new();
        let shape = canvas.add_shape(ShapeKind::Rectangle);
        canvas.set_tool(Tool::Select);
        assert!(canvas.selection_bounds().is_none());
        canvas.click_shape(shape, PLAIN);
        assert_eq!(
            canvas.state().selection_bounds,
            Some(Rect::new(90.0, 90.0, 210.0, 210.0))
        );
    }

    #[test]
    fn test_history_bound() {
        let config = EngineConfig {
            history_capacity: 50,
            ..Default::default()
        };
        let mut canvas = Canvas::with_config(config);
        for _ in 0..60 {
            canvas.add_shape(ShapeKind::Circle);
        }

        let mut undos = 0;
        while canvas.undo() {
            undos += 1;
        }
        assert_eq!(undos, 49);
        // The empty baseline and the first ten edits were evicted.
        assert_eq!(canvas.document().shapes.len(), 11);
    }

    #[test]
    fn test_undo_redo_symmetry() {
        let mut canvas = Canvas::new();
        let baseline = canvas.capture();
        let rect = canvas.add_shape(ShapeKind::Rectangle);
        draw(&mut canvas, &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        canvas.add_text("hello", Point::new(300.0, 300.0));
        canvas.shape_drag_end(rect, Point::new(20.0, 30.0));
        canvas.set_tool(Tool::Select);
        canvas.click_stroke(StrokeId(0), PLAIN);
        canvas.stroke_drag_end(StrokeId(0), Vec2::new(3.0, 4.0));
        let n = 5;

        let after = canvas.capture();
        assert_eq!(after.selected_stroke_ids, vec![StrokeId(0)]);
        for _ in 0..n {
            assert!(canvas.undo());
        }
        assert!(canvas.capture().same_content(&baseline));
        for _ in 0..n {
            assert!(canvas.redo());
        }
        assert!(canvas.capture().same_content(&after));
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_transform_undo_redo_scenario() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(ShapeKind::Rectangle);
        let before = canvas.document().get_shape(id).cloned().unwrap();

        let transform = Transform::new(50.0, 50.0, 40.0, 40.0, 90.0);
        assert!(canvas.shape_transform_end(id, transform));
        let after = canvas.document().get_shape(id).cloned().unwrap();
        assert_eq!(after.bounds(), Rect::new(50.0, 50.0, 90.0, 90.0));
        assert!((after.rotation() - 90.0).abs() < f64::EPSILON);

        assert!(canvas.undo());
        assert_eq!(canvas.document().get_shape(id), Some(&before));

        assert!(canvas.redo());
        assert_eq!(canvas.document().get_shape(id), Some(&after));
    }

    #[test]
    fn test_marquee_delete_undo_scenario() {
        let mut canvas = Canvas::new();
        canvas.set_color(SerializableColor::new(10, 20, 30, 255));
        draw(&mut canvas, &[(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)]);
        let original = canvas.document().strokes[0].clone();
        assert_eq!(original.len(), 3);

        canvas.set_tool(Tool::Select);
        marquee(&mut canvas, (0.0, 0.0), (50.0, 50.0));
        assert_eq!(canvas.selection().stroke_ids(), &[StrokeId(0)]);
        assert!(canvas.delete_selected());
        assert!(canvas.document().strokes.is_empty());
        assert!(canvas.selection().is_empty());

        assert!(canvas.undo());
        assert_eq!(canvas.document().strokes, vec![original]);
    }

    #[test]
    fn test_snapshot_suppressed_after_undo() {
        let mut canvas = Canvas::new();
        canvas.add_shape(ShapeKind::Rectangle);
        canvas.add_shape(ShapeKind::Star);
        assert!(canvas.undo());

        assert!(!canvas.snapshot());
        assert!(canvas.can_redo());

        // A new edit after undo records and drops the redo tail.
        canvas.add_shape(ShapeKind::Arrow);
        assert!(!canvas.can_redo());
        assert!(canvas.snapshot());
    }

    #[test]
    fn test_stale_ids_do_not_push_history() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(ShapeKind::Rectangle);
        canvas.undo();
        let entries = canvas.history.len();

        assert!(!canvas.shape_drag_end(id, Point::new(1.0, 1.0)));
        assert!(!canvas.shape_transform_end(id, Transform::new(0.0, 0.0, 1.0, 1.0, 0.0)));
        assert!(!canvas.stroke_drag_end(StrokeId(4), Vec2::new(1.0, 1.0)));
        assert!(!canvas.stroke_transform_end(
            StrokeId(4),
            Transform::new(0.0, 0.0, 1.0, 1.0, 0.0)
        ));
        assert_eq!(canvas.history.len(), entries);
        assert!(canvas.can_redo());
    }

    #[test]
    fn test_stroke_transform_end() {
        let mut canvas = Canvas::new();
        draw(&mut canvas, &[(0.0, 0.0), (10.0, 0.0)]);
        let transform = Transform::new(100.0, 100.0, 20.0, 1.0, 0.0);
        assert!(canvas.stroke_transform_end(StrokeId(0), transform));
        let points = &canvas.document().strokes[0].points;
        assert_eq!(points[0].position(), Point::new(90.0, 100.0));
        assert_eq!(points[1].position(), Point::new(110.0, 100.0));

        assert!(canvas.undo());
        assert_eq!(canvas.document().strokes[0].points[0].position(), Point::ZERO);
    }

    #[test]
    fn test_background_pan_not_in_history() {
        let mut canvas = Canvas::new();
        canvas.set_pages(vec![
            BackgroundPage::new("p1.png", 400.0, 300.0),
            BackgroundPage::new("p2.png", 400.0, 300.0),
        ]);
        canvas.set_tool(Tool::Select);

        canvas.pointer_down(Point::new(300.0, 200.0), HitTarget::Nothing);
        canvas.pointer_move(Point::new(320.0, 230.0));
        canvas.pointer_up();
        assert_eq!(canvas.background().pan_offset(), Vec2::new(20.0, 30.0));
        assert!(canvas.state().marquee.is_none());
        assert!(!canvas.can_undo());

        assert!(canvas.next_page());
        assert!(!canvas.next_page());
        assert!(canvas.state().background.can_go_prev);
        canvas.reset_pan();
        assert_eq!(canvas.background().pan_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut canvas = Canvas::new();
        canvas.add_shape(ShapeKind::Rectangle);
        draw(&mut canvas, &[(0.0, 0.0)]);
        canvas.set_pages(vec![BackgroundPage::new("p.png", 10.0, 10.0)]);
        canvas.set_pan_offset(Vec2::new(4.0, 4.0));
        canvas.set_tool(Tool::Select);
        canvas.pointer_down(Point::new(500.0, 500.0), HitTarget::Nothing);

        canvas.clear();

        let state = canvas.state();
        assert!(state.strokes.is_empty());
        assert!(state.shapes.is_empty());
        assert!(state.marquee.is_none());
        assert!(state.background.pages.is_empty());
        assert_eq!(state.background.pan_offset, Vec2::ZERO);
        assert!(!state.can_undo);
        assert!(!state.can_redo);
    }

    #[test]
    fn test_state_serializes() {
        let mut canvas = Canvas::new();
        canvas.add_shape(ShapeKind::Rectangle);
        let json = serde_json::to_value(canvas.state()).unwrap();
        assert_eq!(json["tool"], "pen");
        assert_eq!(json["can_undo"], true);
        assert_eq!(json["shapes"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_render_paths_available() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(ShapeKind::Star);
        draw(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        let shape = canvas.document().get_shape(id).unwrap();
        assert!(!shape.to_path().elements().is_empty());
        assert_eq!(canvas.document().strokes[0].to_path().elements().len(), 2);
    }
}
