use inkshare_core::{
    Action, Canvas, KeyInput, MemoryStorage, Modifiers, PointerEvent, ToolKind,
};
use kurbo::Point;
use std::sync::Arc;

fn canvas() -> Canvas {
    Canvas::new(Arc::new(MemoryStorage::new()))
}

fn drag(canvas: &mut Canvas, from: Point, to: Point) {
    canvas.handle_pointer(&PointerEvent::down(from)).unwrap();
    canvas
        .handle_pointer(&PointerEvent::moved(from.midpoint(to)))
        .unwrap();
    canvas.handle_pointer(&PointerEvent::moved(to)).unwrap();
    canvas.handle_pointer(&PointerEvent::up(to)).unwrap();
}

#[test]
fn square_drag_creates_one_selected_action() {
    let mut canvas = canvas();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    assert_eq!(canvas.actions().len(), 1);
    assert_eq!(canvas.tool(), ToolKind::Select);
    let id = canvas.actions().last().unwrap().id().clone();
    assert_eq!(canvas.selection().len(), 1);
    assert!(canvas.selection().contains(&id));
    assert!(matches!(canvas.actions().get(&id), Some(Action::Rectangle(_))));
}

#[test]
fn undersized_square_is_discarded_and_tool_kept() {
    let mut canvas = canvas();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Point::new(10.0, 10.0), Point::new(12.0, 60.0));
    assert!(canvas.actions().is_empty());
    assert_eq!(canvas.tool(), ToolKind::Rectangle);
    assert!(!canvas.history().can_undo());
}

#[test]
fn one_listener_regardless_of_switches() {
    let mut canvas = canvas();
    for _ in 0..3 {
        for tool in ToolKind::ALL {
            canvas.set_tool(tool);
            assert_eq!(canvas.surface().listener_count(), 1);
        }
    }

    // A single gesture produces a single action.
    canvas.set_tool(ToolKind::Circle);
    drag(&mut canvas, Point::ZERO, Point::new(100.0, 0.0));
    assert_eq!(canvas.actions().len(), 1);
}

#[test]
fn keyboard_drives_tools_and_history() {
    let mut canvas = canvas();
    canvas.handle_key(&KeyInput::plain("c")).unwrap();
    assert_eq!(canvas.tool(), ToolKind::Circle);
    drag(&mut canvas, Point::ZERO, Point::new(60.0, 0.0));
    assert_eq!(canvas.actions().len(), 1);

    canvas.handle_key(&KeyInput::plain("Backspace")).unwrap();
    assert!(canvas.actions().is_empty());

    let redo = KeyInput::new(
        "z",
        Modifiers {
            meta: true,
            shift: true,
            ..Modifiers::NONE
        },
    );
    canvas.handle_key(&KeyInput::new("z", Modifiers::ctrl())).unwrap();
    assert_eq!(canvas.actions().len(), 1);
    canvas.handle_key(&redo).unwrap();
    assert!(canvas.actions().is_empty());
}

#[test]
fn escape_cancels_in_progress_gesture() {
    let mut canvas = canvas();
    canvas.set_tool(ToolKind::StraightLine);
    canvas.handle_pointer(&PointerEvent::down(Point::ZERO)).unwrap();
    canvas
        .handle_pointer(&PointerEvent::moved(Point::new(80.0, 0.0)))
        .unwrap();
    assert_eq!(canvas.display_store().len(), 1);

    canvas.handle_key(&KeyInput::plain("Escape")).unwrap();
    canvas
        .handle_pointer(&PointerEvent::up(Point::new(80.0, 0.0)))
        .unwrap();
    assert!(canvas.actions().is_empty());
    assert!(canvas.display_store().is_empty());
}
