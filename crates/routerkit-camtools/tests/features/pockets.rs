use routerkit_camtools::{generate_gcode, CamToolError, GCodeOptions};
use routerkit_core::{ComplexAmount, CutError, JobContext, RouterBit};
use routerkit_designer::{Compound, ConicPocket, Cut, SimpleTransform, Transformish};

fn job() -> JobContext {
    JobContext::new(
        "inch",
        &ComplexAmount::parse("1/4in").unwrap(),
        RouterBit::flat(0.125),
    )
    .unwrap()
}

fn pocket(bottom_depth: f64, cuts_bottom: bool) -> Cut {
    Cut::ConicPocket(ConicPocket {
        diameter: 0.5,
        edge_depth: 0.0,
        bottom_diameter: 0.25,
        bottom_depth,
        cuts_bottom,
        comment: None,
    })
}

fn word(line: &str, letter: char) -> Option<f64> {
    line.split_whitespace()
        .find_map(|w| w.strip_prefix(letter))
        .and_then(|v| v.parse().ok())
}

#[test]
fn test_rings_shrink_and_descend() {
    let job = job();
    let gcode = generate_gcode(&job, GCodeOptions::default(), &[pocket(0.1, false)]).unwrap();

    let radii: Vec<f64> = gcode
        .lines()
        .filter(|l| l.starts_with("G03"))
        .filter_map(|l| word(l, 'J'))
        .collect();
    assert_eq!(radii.len(), 5);
    assert_eq!(radii[0], 0.25);
    assert_eq!(radii[4], 0.125);
    assert!(radii.windows(2).all(|w| w[1] < w[0]));

    let depths: Vec<f64> = gcode
        .lines()
        .filter(|l| l.starts_with("G01 Z"))
        .filter_map(|l| word(l, 'Z'))
        .collect();
    assert_eq!(depths.first(), Some(&0.0));
    assert_eq!(depths.last(), Some(&-0.1));
    assert!(depths.windows(2).all(|w| w[1] < w[0]));

    assert!(gcode.contains("G00 X0.0000 Y-0.2500\n"));
    assert!(gcode.contains("G03 X0.0000 Y-0.2500 I0.0000 J0.2500\n"));
}

#[test]
fn test_through_pocket_stops_at_stock_bottom() {
    let job = job();
    let gcode =
        generate_gcode(&job, GCodeOptions::default(), &[pocket(f64::INFINITY, false)]).unwrap();
    assert!(gcode.contains("G01 Z-0.2500\nG03 X0.0000 Y-0.1250 I0.0000 J0.1250\n"));
    assert!(!gcode.contains("NaN"));
}

#[test]
fn test_flat_bottom_is_unsupported() {
    let job = job();
    let err = generate_gcode(&job, GCodeOptions::default(), &[pocket(0.1, true)]).unwrap_err();
    assert!(matches!(
        err,
        CamToolError::Cut(CutError::UnsupportedFeature { .. })
    ));
}

#[test]
fn test_inverted_cone_is_rejected() {
    let job = job();
    let cut = Cut::ConicPocket(ConicPocket {
        diameter: 0.25,
        edge_depth: 0.0,
        bottom_diameter: 0.5,
        bottom_depth: 0.1,
        cuts_bottom: false,
        comment: None,
    });
    let err = generate_gcode(&job, GCodeOptions::default(), &[cut]).unwrap_err();
    assert!(matches!(err, CamToolError::Parameter(_)));
}

#[test]
fn test_pocket_placed_below_stock_is_skipped() {
    let job = job();
    let lowered = Cut::Compound(
        Compound::new(vec![pocket(f64::INFINITY, false)]).with_transforms(vec![
            Transformish::Simple(SimpleTransform {
                z: Some(-0.3),
                ..Default::default()
            }),
        ]),
    );
    let gcode = generate_gcode(&job, GCodeOptions::default(), &[lowered]).unwrap();
    assert!(!gcode.contains("G03"));
    assert!(!gcode.contains("Z-0.3000"));
}
