//! Integration tests for starlet-core.
//!
//! These tests exercise the public API end-to-end: a small widget that
//! renders an element tree, paints onto a recording canvas and reacts to
//! pointer events.

use starlet_core::{
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, DrawCommand, Element,
    Event, LayoutResult, Point, RecordingCanvas, Rect, Size, TypeId, Widget,
};
use std::any::Any;

#[derive(Debug, Default)]
struct Dot {
    bounds: Rect,
    lit: bool,
}

impl Dot {
    fn render(&self) -> Element {
        let el = Element::new("span").class("dot");
        if self.lit {
            el.class("lit")
        } else {
            el
        }
    }
}

impl Brick for Dot {
    fn brick_name(&self) -> &'static str {
        "Dot"
    }

    fn assertions(&self) -> Vec<BrickAssertion> {
        vec![BrickAssertion::element_present(".dot")]
    }

    fn verify(&self) -> BrickVerification {
        let mut v = BrickVerification::new();
        let ok = self.render().has_class("dot");
        v.check(
            BrickAssertion::element_present(".dot"),
            if ok { Ok(()) } else { Err("no dot".into()) },
        );
        v
    }

    fn to_html(&self) -> String {
        self.render().to_html()
    }

    fn to_css(&self) -> String {
        ".dot { display: inline-block; }".to_string()
    }
}

impl Widget for Dot {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(10.0, 10.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let color = if self.lit { Color::WHITE } else { Color::BLACK };
        let b = self.bounds;
        let corners = [
            b.origin(),
            Point::new(b.right(), b.y),
            Point::new(b.right(), b.bottom()),
            Point::new(b.x, b.bottom()),
        ];
        canvas.fill_polygon(&corners, color);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseDown { position, .. } if self.bounds.contains_point(position) => {
                self.lit = !self.lit;
                Some(Box::new(self.lit))
            }
            _ => None,
        }
    }
}

#[test]
fn test_widget_cycle_end_to_end() {
    let mut dot = Dot::default();
    let size = dot.measure(Constraints::loose(Size::new(100.0, 100.0)));
    dot.layout(Rect::new(0.0, 0.0, size.width, size.height));

    let msg = dot.event(&Event::left_click(Point::new(5.0, 5.0)));
    let lit = msg.and_then(|m| m.downcast::<bool>().ok()).map(|b| *b);
    assert_eq!(lit, Some(true));

    let mut canvas = RecordingCanvas::new();
    dot.paint(&mut canvas);
    assert_eq!(
        canvas.commands(),
        [DrawCommand::Polygon {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            color: Color::WHITE
        }]
    );
    assert_eq!(dot.to_html(), r#"<span class="dot lit"></span>"#);
    assert!(dot.can_render());
}

#[test]
fn test_click_outside_is_ignored() {
    let mut dot = Dot::default();
    dot.layout(Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(dot.event(&Event::left_click(Point::new(50.0, 5.0))).is_none());
    assert!(dot.event(&Event::MouseLeave).is_none());
}

#[test]
fn test_draw_commands_serialize_to_json() {
    let cmd = DrawCommand::PushClip {
        bounds: Rect::new(0.0, 0.0, 12.0, 24.0),
    };
    let json = serde_json::to_string(&cmd).expect("serialize");
    assert!(json.contains("PushClip"));
}
