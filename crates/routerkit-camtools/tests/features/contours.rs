use routerkit_camtools::{generate_gcode, CommentMode, GCodeOptions};
use routerkit_core::{ComplexAmount, JobContext, RouterBit, Vector3D};
use routerkit_designer::{
    box_path, circle_path, Compound, Cut, MatrixTransform, PathBuilder, Transformish,
    BoxOptions,
};

fn quarter_inch_job() -> JobContext {
    JobContext::new(
        "inch",
        &ComplexAmount::parse("1/4in").unwrap(),
        RouterBit::flat(0.125),
    )
    .unwrap()
}

fn options(step_down: f64) -> GCodeOptions {
    GCodeOptions {
        step_down,
        ..Default::default()
    }
}

#[test]
fn test_rectangle_two_passes() {
    let job = quarter_inch_job();
    let outline = box_path(&BoxOptions::from_corner(0.0, 0.0, 2.0, 1.0)).unwrap();
    let gcode = generate_gcode(&job, options(0.05), &[Cut::trace_path(outline, 0.1)]).unwrap();

    assert_eq!(gcode.matches("(Step down to").count(), 2);
    assert!(gcode.contains("(Step down to -0.0500)\nG01 Z-0.0500\n"));
    assert!(gcode.contains("(Step down to -0.1000)\nG01 Z-0.1000\n"));

    let cutting_moves = gcode
        .lines()
        .filter(|l| l.starts_with("G01") && !l.contains('Z'))
        .count();
    assert_eq!(cutting_moves, 8);

    // Closed loop: both passes go the same way round.
    assert_eq!(gcode.matches("G01 X2.0000\n").count(), 2);
    assert!(!gcode.contains("G02"));
    assert!(!gcode.contains("G03"));
}

#[test]
fn test_approach_then_retract() {
    let job = quarter_inch_job();
    let outline = box_path(&BoxOptions::from_corner(1.0, 1.0, 1.0, 1.0)).unwrap();
    let gcode = generate_gcode(&job, options(0.05), &[Cut::trace_path(outline, 0.05)]).unwrap();

    assert!(gcode.contains("G00 X1.0000 Y1.0000\nG00 Z0.0625\nG01 Z0.0000\n"));
    let lines: Vec<&str> = gcode.lines().collect();
    let last_cut = lines.iter().rposition(|l| l.starts_with("G01")).unwrap();
    assert_eq!(lines[last_cut + 1], "G00 Z0.2500");
    assert!(gcode.ends_with("(Job done!)\nM05\n"));
}

#[test]
fn test_open_path_alternates_direction() {
    let job = quarter_inch_job();
    let mut pb = PathBuilder::new(Vector3D::zeros());
    pb.line_to(Vector3D::new(1.0, 0.0, 0.0))
        .line_to(Vector3D::new(1.0, 1.0, 0.0));
    let gcode =
        generate_gcode(&job, options(0.02), &[Cut::trace_path(pb.into_path(), 0.06)]).unwrap();

    let moves: Vec<&str> = gcode
        .lines()
        .filter(|l| l.starts_with("G01") && !l.contains('Z'))
        .collect();
    assert_eq!(
        moves,
        vec![
            "G01 X1.0000",
            "G01 Y1.0000",
            "G01 Y0.0000",
            "G01 X0.0000",
            "G01 X1.0000",
            "G01 Y1.0000",
        ]
    );
}

#[test]
fn test_circle_is_counter_clockwise() {
    let job = quarter_inch_job();
    let gcode =
        generate_gcode(&job, options(0.05), &[Cut::trace_path(circle_path(1.0), 0.05)]).unwrap();
    assert!(gcode.contains("G03 X0.0000 Y-1.0000 I0.0000 J1.0000"));
    assert!(!gcode.contains("G02"));
}

#[test]
fn test_mirroring_flips_arc_direction() {
    let job = quarter_inch_job();
    let mirror = Transformish::Matrix(MatrixTransform {
        xx: -1.0,
        xy: 0.0,
        xz: 0.0,
        x1: 0.0,
        yx: 0.0,
        yy: 1.0,
        yz: 0.0,
        y1: 0.0,
        zx: 0.0,
        zy: 0.0,
        zz: 1.0,
        z1: 0.0,
    });
    let cut = Cut::Compound(
        Compound::new(vec![Cut::trace_path(circle_path(1.0), 0.05)]).with_transforms(vec![mirror]),
    );
    let gcode = generate_gcode(&job, options(0.05), &[cut]).unwrap();
    assert!(gcode.contains("G02 X0.0000 Y-1.0000 I0.0000 J1.0000"));
    assert!(!gcode.contains("G03"));
}

#[test]
fn test_through_cut_reaches_bottom() {
    let job = quarter_inch_job();
    let outline = box_path(&BoxOptions::centered(0.0, 0.0, 1.0, 1.0)).unwrap();
    let gcode = generate_gcode(
        &job,
        options(0.1),
        &[Cut::trace_path(outline, f64::INFINITY)],
    )
    .unwrap();
    assert_eq!(gcode.matches("(Step down to").count(), 3);
    assert!(gcode.contains("G01 Z-0.2500"));
    assert!(!gcode.contains("Z-0.3"));
}

#[test]
fn test_comments_follow_mode() {
    let job = quarter_inch_job();
    let cut = Cut::trace_path(circle_path(0.5), 0.02).with_comment("outline");

    let semicolons = GCodeOptions {
        comment_mode: CommentMode::Semicolon,
        ..Default::default()
    };
    let gcode = generate_gcode(&job, semicolons, &[cut.clone()]).unwrap();
    assert!(gcode.contains("; outline\n"));
    assert!(gcode.contains("; Step down to -0.0200\n"));

    let silent = GCodeOptions {
        comment_mode: CommentMode::None,
        ..Default::default()
    };
    let gcode = generate_gcode(&job, silent, &[cut]).unwrap();
    assert!(!gcode.contains("outline"));
    assert!(!gcode.contains('('));
    assert!(!gcode.contains(';'));
}

#[test]
fn test_metric_job() {
    let job = JobContext::new(
        "mm",
        &ComplexAmount::parse("12mm").unwrap(),
        RouterBit::flat(6.0),
    )
    .unwrap();
    let options = GCodeOptions {
        safe_height: 6.0,
        minimum_fast_z: 1.5,
        step_down: 1.0,
        ..Default::default()
    };
    let outline = box_path(&BoxOptions::from_corner(0.0, 0.0, 50.0, 25.0)).unwrap();
    let gcode = generate_gcode(&job, options, &[Cut::trace_path(outline, 2.0)]).unwrap();
    assert!(gcode.starts_with("G90\nG21\n"));
    assert!(gcode.contains("G01 X50.0000"));
    assert!(gcode.contains("G01 Z-2.0000"));
}

#[test]
fn test_inch_compound_in_metric_job() {
    let job = JobContext::new(
        "mm",
        &ComplexAmount::parse("12mm").unwrap(),
        RouterBit::flat(6.0),
    )
    .unwrap();
    let options = GCodeOptions {
        safe_height: 6.0,
        minimum_fast_z: 1.5,
        step_down: 1.0,
        ..Default::default()
    };
    let outline = box_path(&BoxOptions::from_corner(0.0, 0.0, 2.0, 1.0)).unwrap();
    let cut = Cut::Compound(
        Compound::new(vec![Cut::trace_path(outline, 0.02)])
            .with_unit(ComplexAmount::parse("1in").unwrap()),
    );
    let gcode = generate_gcode(&job, options, &[cut]).unwrap();
    assert!(gcode.contains("G01 X50.8000"));
    assert!(gcode.contains("G01 Y25.4000"));
}
