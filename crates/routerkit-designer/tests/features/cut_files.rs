use routerkit_core::ComplexAmount;
use routerkit_designer::{
    box_path, circle_path, BoxOptions, Compound, ConicPocket, CornerStyle, Cut, CutFile,
    Transformish,
};
use tempfile::TempDir;

fn countersunk_hole() -> Cut {
    Cut::Compound(
        Compound::new(vec![
            Cut::from(ConicPocket {
                diameter: 0.25,
                edge_depth: 0.0,
                bottom_diameter: 0.126,
                bottom_depth: 0.0625,
                cuts_bottom: false,
                comment: None,
            }),
            Cut::round_hole(0.126, f64::INFINITY),
        ])
        .with_unit(ComplexAmount::parse("1in").unwrap()),
    )
    .with_comment("#6 countersunk hole")
}

fn panel() -> Vec<Cut> {
    let outline = box_path(
        &BoxOptions::from_corner(0.0, 0.0, 4.0, 2.0).with_corners(CornerStyle::Round, 0.25),
    )
    .unwrap();
    vec![
        Cut::Compound(Compound::new(vec![countersunk_hole()]).with_transforms(vec![
            Transformish::offset(0.5, 0.5),
            Transformish::offset(3.5, 1.5),
        ])),
        Cut::trace_path(circle_path(0.5), 0.05),
        Cut::pause().with_comment("Flip the panel"),
        Cut::trace_path(outline, f64::INFINITY),
    ]
}

#[test]
fn test_save_and_load_cut_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("panel.json");

    let mut file = CutFile::new(panel());
    file.name = Some("Front panel".to_string());
    file.save_to_file(&file_path).unwrap();

    let loaded = CutFile::load_from_file(&file_path).unwrap();
    assert_eq!(loaded, file);
}

#[test]
fn test_cut_file_is_readable_json() {
    let json = CutFile::new(panel()).to_json().unwrap();
    assert!(json.contains("\"type\": \"Compound\""));
    assert!(json.contains("\"unit\": \"1in\""));
    assert!(json.contains("\"depth\": \"Infinity\""));
    assert!(json.contains("\"cutsBottom\": false"));
}

#[test]
fn test_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let err = CutFile::load_from_file(temp_dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_hand_written_file() {
    let json = r#"{
        "cuts": [
            {
                "type": "Compound",
                "transforms": [{"x": 0, "y": 0}, {"x": 1, "y": 0, "rotation": 90}],
                "components": [{"type": "RoundHole", "diameter": 0.2, "depth": "Infinity"}]
            },
            {"type": "Pause"}
        ]
    }"#;
    let file = CutFile::from_json(json).unwrap();
    assert_eq!(file.cuts.len(), 2);
    match &file.cuts[0] {
        Cut::Compound(c) => assert_eq!(c.transforms.len(), 2),
        other => panic!("expected compound, got {other:?}"),
    }
}
