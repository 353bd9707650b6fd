//! Pointer gesture state machine.
//!
//! [`Gesture::handle`] is a pure transition function: it consumes the current
//! state and an event and returns the next state together with the effects
//! the caller must apply, in order.

use super::{DrawingAttributes, Tool};
use crate::background::BackgroundStore;
use crate::input::PointerEvent;
use crate::shapes::Stroke;
use kurbo::{Point, Size, Vec2};

/// Read-only view of the engine a transition may consult.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub background: &'a BackgroundStore,
    pub viewport: Size,
    /// Moves closer than this to the previous point are dropped.
    pub min_point_distance: f64,
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a finished stroke to the document.
    CommitStroke(Stroke),
    /// Seed a zero-size marquee.
    BeginMarquee(Point),
    /// Move the marquee's free corner.
    UpdateMarquee(Point),
    /// Select what the marquee covers and drop it.
    CommitMarquee,
    /// Replace the background pan offset.
    SetPanOffset(Vec2),
    /// Record a history snapshot.
    PushHistory,
}

/// Gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Building a freehand stroke.
    Drawing { stroke: Stroke },
    /// Dragging a selection rectangle.
    Marqueeing,
    /// Panning the background page.
    DraggingBackground {
        /// Grabbed point relative to the page's top-left corner.
        grab: Vec2,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Drawing { .. } => "drawing",
            Gesture::Marqueeing => "marquee",
            Gesture::DraggingBackground { .. } => "background drag",
        }
    }

    /// The stroke being drawn, if any.
    pub fn in_progress_stroke(&self) -> Option<&Stroke> {
        match self {
            Gesture::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }

    /// Apply one pointer event. Events with no transition leave the state
    /// unchanged and produce no effects.
    pub fn handle(
        self,
        event: PointerEvent,
        tool: Tool,
        attributes: &DrawingAttributes,
        ctx: &GestureContext<'_>,
    ) -> (Gesture, Vec<Effect>) {
        match (self, event) {
            (Gesture::Idle, PointerEvent::Down { position, hit }) => {
                if let Some(mode) = tool.draw_mode() {
                    let stroke = Stroke::starting_at(attributes.point(position, mode));
                    log::debug!("Stroke started at ({}, {})", position.x, position.y);
                    return (Gesture::Drawing { stroke }, Vec::new());
                }
                if let Some(grab) = ctx.background.hit_test(position, ctx.viewport) {
                    log::debug!("Background drag started, grab {:?}", grab);
                    return (Gesture::DraggingBackground { grab }, Vec::new());
                }
                if !hit.is_nothing() {
                    // Clicks on content are reported by the renderer.
                    return (Gesture::Idle, Vec::new());
                }
                (Gesture::Marqueeing, vec![Effect::BeginMarquee(position)])
            }

            (Gesture::Drawing { mut stroke }, PointerEvent::Move { position }) => {
                let far_enough = stroke.last().is_none_or(|last| {
                    (position - last.position()).hypot() > ctx.min_point_distance
                });
                if far_enough {
                    let point = match stroke.last() {
                        Some(last) => last.moved_to(position),
                        None => attributes.point(position, tool.draw_mode().unwrap_or_default()),
                    };
                    stroke.add_point(point);
                } else {
                    log::trace!("Dropped point ({}, {})", position.x, position.y);
                }
                (Gesture::Drawing { stroke }, Vec::new())
            }

            (Gesture::Drawing { stroke }, PointerEvent::Up) => {
                if stroke.is_empty() {
                    return (Gesture::Idle, Vec::new());
                }
                (
                    Gesture::Idle,
                    vec![Effect::CommitStroke(stroke), Effect::PushHistory],
                )
            }

            (Gesture::Marqueeing, PointerEvent::Move { position }) => {
                (Gesture::Marqueeing, vec![Effect::UpdateMarquee(position)])
            }

            (Gesture::Marqueeing, PointerEvent::Up) => (Gesture::Idle, vec![Effect::CommitMarquee]),

            (Gesture::DraggingBackground { grab }, PointerEvent::Move { position }) => {
                let effects = ctx
                    .background
                    .offset_for_drag(position, grab, ctx.viewport)
                    .map(Effect::SetPanOffset)
                    .into_iter()
                    .collect();
                (Gesture::DraggingBackground { grab }, effects)
            }

            (Gesture::DraggingBackground { .. }, PointerEvent::Up) => (Gesture::Idle, Vec::new()),

            (state, _) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::BackgroundPage;
    use crate::input::HitTarget;
    use crate::shapes::{DrawMode, StrokeId};
    use crate::tools::ToolManager;

    fn ctx(background: &BackgroundStore) -> GestureContext<'_> {
        GestureContext {
            background,
            viewport: Size::new(800.0, 600.0),
            min_point_distance: 2.0,
        }
    }

    fn run(
        manager: &mut ToolManager,
        ctx: &GestureContext<'_>,
        events: &[PointerEvent],
    ) -> Vec<Effect> {
        events
            .iter()
            .flat_map(|event| manager.handle(*event, ctx))
            .collect()
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            hit: HitTarget::Nothing,
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_move_while_idle_is_noop() {
        let background = BackgroundStore::new();
        let (state, effects) = Gesture::Idle.handle(
            mv(5.0, 5.0),
            Tool::Pen,
            &DrawingAttributes::default(),
            &ctx(&background),
        );
        assert!(state.is_idle());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_draw_commits_and_pushes_history() {
        let background = BackgroundStore::new();
        let mut tools = ToolManager::default();
        let effects = run(
            &mut tools,
            &ctx(&background),
            &[down(0.0, 0.0), mv(10.0, 0.0), mv(20.0, 0.0)],
        );
        assert!(effects.is_empty());
        assert_eq!(tools.gesture().in_progress_stroke().map(Stroke::len), Some(3));

        let effects = tools.handle(PointerEvent::Up, &ctx(&background));
        assert!(tools.gesture().is_idle());
        let [Effect::CommitStroke(stroke), Effect::PushHistory] = effects.as_slice() else {
            panic!("unexpected effects: {effects:?}");
        };
        assert_eq!(stroke.len(), 3);
    }

    #[test]
    fn test_decimation_drops_close_points() {
        let background = BackgroundStore::new();
        let mut tools = ToolManager::default();
        run(
            &mut tools,
            &ctx(&background),
            &[
                down(0.0, 0.0),
                mv(1.0, 0.0),
                mv(1.0, 1.0),
                mv(2.0, 0.0),
                mv(0.5, 0.5),
            ],
        );
        assert_eq!(tools.gesture().in_progress_stroke().map(Stroke::len), Some(1));

        // Distance must exceed the threshold, not just reach it.
        tools.handle(mv(0.0, 2.0), &ctx(&background));
        assert_eq!(tools.gesture().in_progress_stroke().map(Stroke::len), Some(1));
        tools.handle(mv(0.0, 2.5), &ctx(&background));
        assert_eq!(tools.gesture().in_progress_stroke().map(Stroke::len), Some(2));
    }

    #[test]
    fn test_tap_commits_single_point() {
        let background = BackgroundStore::new();
        let mut tools = ToolManager::default();
        let effects = run(
            &mut tools,
            &ctx(&background),
            &[down(4.0, 4.0), PointerEvent::Up],
        );
        assert!(matches!(&effects[0], Effect::CommitStroke(s) if s.len() == 1));
    }

    #[test]
    fn test_eraser_stroke_mode() {
        let background = BackgroundStore::new();
        let mut tools = ToolManager::default();
        tools.set_tool(Tool::Eraser);
        run(
            &mut tools,
            &ctx(&background),
            &[down(0.0, 0.0), mv(10.0, 10.0)],
        );
        let stroke = tools.gesture().in_progress_stroke().unwrap();
        assert_eq!(stroke.mode(), DrawMode::Erase);
        assert!(stroke.points.iter().all(|p| p.mode == DrawMode::Erase));
    }

    #[test]
    fn test_select_on_empty_canvas_marquees() {
        let background = BackgroundStore::new();
        let mut tools = ToolManager::default();
        tools.set_tool(Tool::Select);
        let effects = run(
            &mut tools,
            &ctx(&background),
            &[down(1.0, 2.0), mv(30.0, 40.0), PointerEvent::Up],
        );
        assert_eq!(
            effects,
            vec![
                Effect::BeginMarquee(Point::new(1.0, 2.0)),
                Effect::UpdateMarquee(Point::new(30.0, 40.0)),
                Effect::CommitMarquee,
            ]
        );
    }

    #[test]
    fn test_select_on_hit_target_is_claimed() {
        let background = BackgroundStore::new();
        let mut tools = ToolManager::default();
        tools.set_tool(Tool::Select);
        let effects = tools.handle(
            PointerEvent::Down {
                position: Point::ZERO,
                hit: HitTarget::Stroke(StrokeId(0)),
            },
            &ctx(&background),
        );
        assert!(effects.is_empty());
        assert!(tools.gesture().is_idle());
    }

    #[test]
    fn test_background_drag() {
        let mut background = BackgroundStore::new();
        background.set_pages(vec![BackgroundPage::new("p.png", 400.0, 300.0)]);
        let mut tools = ToolManager::default();
        tools.set_tool(Tool::Select);

        // Page is displayed at (200, 150)..(600, 450).
        let effects = run(
            &mut tools,
            &ctx(&background),
            &[down(210.0, 160.0), mv(260.0, 170.0)],
        );
        assert_eq!(effects, vec![Effect::SetPanOffset(Vec2::new(50.0, 10.0))]);
        assert!(matches!(tools.gesture(), Gesture::DraggingBackground { .. }));

        let effects = tools.handle(PointerEvent::Up, &ctx(&background));
        assert!(effects.is_empty());
        assert!(tools.gesture().is_idle());
    }

    #[test]
    fn test_select_outside_page_marquees() {
        let mut background = BackgroundStore::new();
        background.set_pages(vec![BackgroundPage::new("p.png", 400.0, 300.0)]);
        let mut tools = ToolManager::default();
        tools.set_tool(Tool::Select);
        let effects = tools.handle(down(10.0, 10.0), &ctx(&background));
        assert_eq!(effects, vec![Effect::BeginMarquee(Point::new(10.0, 10.0))]);
    }

    #[test]
    fn test_select_on_content_over_page_drags_page() {
        let mut background = BackgroundStore::new();
        background.set_pages(vec![BackgroundPage::new("p.png", 400.0, 300.0)]);
        let mut tools = ToolManager::default();
        tools.set_tool(Tool::Select);

        let effects = run(
            &mut tools,
            &ctx(&background),
            &[
                PointerEvent::Down {
                    position: Point::new(210.0, 160.0),
                    hit: HitTarget::Stroke(StrokeId(0)),
                },
                mv(230.0, 190.0),
            ],
        );
        assert_eq!(effects, vec![Effect::SetPanOffset(Vec2::new(20.0, 30.0))]);
        assert!(matches!(tools.gesture(), Gesture::DraggingBackground { .. }));
    }

    #[test]
    fn test_set_tool_cancels_gesture() {
        let background = BackgroundStore::new();
        let mut tools = ToolManager::default();
        tools.handle(down(0.0, 0.0), &ctx(&background));
        assert!(tools.set_tool(Tool::Select));
        assert!(tools.gesture().is_idle());
        assert!(tools.handle(PointerEvent::Up, &ctx(&background)).is_empty());
        assert!(!tools.set_tool(Tool::Pen));
    }
}
