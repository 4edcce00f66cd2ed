use proptest::prelude::*;
use routerkit_core::Vector3D;
use routerkit_designer::{CornerStyle, PathBuilder, PathSegment, QUARTER_TURN};

proptest! {
    #[test]
    fn test_repeated_line_to_adds_nothing(
        points in prop::collection::vec((-100i32..100, -100i32..100), 1..20)
    ) {
        let mut pb = PathBuilder::new(Vector3D::zeros());
        let mut once = PathBuilder::new(Vector3D::zeros());
        for (x, y) in points {
            let p = Vector3D::new(x as f64 / 8.0, y as f64 / 8.0, 0.0);
            pb.line_to(p).line_to(p);
            once.line_to(p);
        }
        prop_assert_eq!(pb.path(), once.path());
        for segment in &pb.path().segments {
            prop_assert_ne!(segment.start(), segment.end());
        }
    }

    #[test]
    fn test_inverse_turn_restores_heading(
        angle in -3.0f64..3.0,
        radius in 0.01f64..10.0,
    ) {
        let mut pb = PathBuilder::new(Vector3D::zeros());
        pb.turn(angle, radius, CornerStyle::Round)
            .turn(-angle, radius, CornerStyle::Round);
        let heading = pb.current_direction();
        prop_assert!((heading - Vector3D::x()).norm() < 1e-9);
        // The S-curve advances along the original heading.
        prop_assert!(pb.current_position().x >= -1e-9);
    }
}

#[test]
fn test_rounded_corner_lands_on_next_edge() {
    let mut pb = PathBuilder::new(Vector3D::zeros());
    pb.line_to_corner_start(Vector3D::new(2.0, 0.0, 0.0), QUARTER_TURN, 0.5)
        .turn(QUARTER_TURN, 0.5, CornerStyle::Round)
        .line_to(Vector3D::new(2.0, 1.0, 0.0));
    let path = pb.into_path();
    assert_eq!(path.vertices[1], Vector3D::new(1.5, 0.0, 0.0));
    assert!(matches!(path.segments[1], PathSegment::Arc { .. }));
    assert_eq!(path.segments.len(), 3);
}
