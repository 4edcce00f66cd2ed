use routerkit_camtools::{generate_gcode, GCodeOptions};
use routerkit_core::{ComplexAmount, JobContext, RouterBit};
use routerkit_designer::{Compound, Cut, SimpleTransform, Transformish};

fn job(bit: RouterBit) -> JobContext {
    JobContext::new("inch", &ComplexAmount::parse("1/4in").unwrap(), bit).unwrap()
}

#[test]
fn test_narrow_hole_is_pecked() {
    let job = job(RouterBit::flat(0.125));
    let gcode = generate_gcode(&job, GCodeOptions::default(), &[Cut::round_hole(0.1, 0.05)]).unwrap();

    assert!(gcode.contains("hole will be pecked"));
    assert!(gcode.contains("G00 X0.0000 Y0.0000\nG00 Z0.0625\nG01 Z0.0000\n"));
    // Plunge a step, back off half a step, repeat.
    assert!(gcode.contains("G01 Z-0.0200\nG01 Z-0.0100\nG01 Z-0.0300\nG01 Z-0.0200\n"));
    assert!(gcode.contains("G01 Z-0.0500\nG00 Z0.2500\n"));
    assert!(!gcode.contains("G02"));
    assert!(!gcode.contains("G03"));
}

#[test]
fn test_hole_matching_tip_is_pecked() {
    let job = job(RouterBit::flat(0.125));
    let gcode = generate_gcode(&job, GCodeOptions::default(), &[Cut::round_hole(0.125, 0.02)]).unwrap();
    assert!(gcode.contains("hole will be pecked"));
    assert!(!gcode.contains("G03"));
}

#[test]
fn test_v_bit_pecks_small_holes() {
    let job = job(RouterBit::v_bit(60.0, 0.0));
    let gcode = generate_gcode(&job, GCodeOptions::default(), &[Cut::round_hole(0.0, 0.04)]).unwrap();
    assert!(gcode.contains("hole will be pecked"));
    assert!(gcode.contains("G01 Z-0.0400"));
}

#[test]
fn test_wide_through_holes_are_milled() {
    let job = job(RouterBit::flat(0.125));
    let holes = Cut::Compound(
        Compound::new(vec![Cut::round_hole(0.2, f64::INFINITY)])
            .with_transforms(vec![Transformish::offset(1.0, 1.0), Transformish::offset(2.0, 1.0)]),
    );
    let gcode = generate_gcode(&job, GCodeOptions::default(), &[holes]).unwrap();

    assert_eq!(gcode.matches("hole will be circles").count(), 2);
    assert!(gcode.contains("G00 X1.0000 Y0.9625\n"));
    // Y is unchanged for the second hole, so only X is written.
    assert!(gcode.contains("G00 X2.0000\n"));
    // Both holes reach the bottom of the stock.
    assert_eq!(gcode.matches("G01 Z-0.2500\n").count(), 2);
    // Cutting edge traces the hole: circle radius is (0.2 - 0.125) / 2.
    let arcs: Vec<&str> = gcode.lines().filter(|l| l.starts_with("G03")).collect();
    assert_eq!(arcs.len(), 26);
    assert!(arcs.iter().all(|l| l.ends_with("I0.0000 J0.0375")));
}

#[test]
fn test_scaled_compound_scales_hole() {
    let job = job(RouterBit::flat(0.125));
    let cut = Cut::Compound(
        Compound::new(vec![Cut::round_hole(0.1, 0.01)])
            .with_unit(ComplexAmount::parse("2in").unwrap()),
    );
    let gcode = generate_gcode(&job, GCodeOptions::default(), &[cut]).unwrap();
    // 0.1 local units of 2in is 0.2in.
    assert!(gcode.contains("(0.2000in hole will be circles)"));
    assert!(gcode.contains("J0.0375"));
    assert!(gcode.contains("G01 Z-0.0200"));
}

fn lowest_z(gcode: &str) -> f64 {
    gcode
        .lines()
        .flat_map(|l| l.split_whitespace())
        .filter_map(|w| w.strip_prefix('Z'))
        .filter_map(|v| v.parse::<f64>().ok())
        .fold(f64::INFINITY, f64::min)
}

fn lowered(z: f64, hole: Cut) -> Cut {
    Cut::Compound(
        Compound::new(vec![hole]).with_transforms(vec![Transformish::Simple(SimpleTransform {
            z: Some(z),
            ..Default::default()
        })]),
    )
}

#[test]
fn test_hole_placed_below_stock_is_skipped() {
    let job = job(RouterBit::flat(0.125));
    let cuts = [
        lowered(-0.3, Cut::round_hole(0.1, f64::INFINITY)),
        lowered(-0.3, Cut::round_hole(0.1, 0.05)),
    ];
    let gcode = generate_gcode(&job, GCodeOptions::default(), &cuts).unwrap();
    assert!(lowest_z(&gcode) >= -0.25);
    assert!(!gcode.contains("Z-0.3000"));
    assert!(!gcode.contains("G01 Z"));
}

#[test]
fn test_lowered_hole_stops_at_stock_bottom() {
    let job = job(RouterBit::flat(0.125));
    let gcode = generate_gcode(
        &job,
        GCodeOptions::default(),
        &[lowered(-0.2, Cut::round_hole(0.1, 0.1))],
    )
    .unwrap();
    assert!(gcode.contains("hole will be pecked"));
    assert!(gcode.contains("G01 Z-0.2500\nG00 Z0.2500\n"));
    assert_eq!(lowest_z(&gcode), -0.25);
}
