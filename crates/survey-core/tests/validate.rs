use survey_core::{partition_points, validate_point, validate_points};
use survey_model::{
    ControlCodeDefinition, Coordinates, Decoration, Definition, ExpandedPoint, InvalidReason,
    PointField, ValidationOutcome,
};

fn definition() -> Definition {
    Definition::new(
        ["TREE", "ROAD"],
        vec![ControlCodeDefinition::new("PIN", Decoration::default())],
        "+",
    )
}

fn point(record: usize, code: &str) -> ExpandedPoint {
    ExpandedPoint {
        record,
        id: record.to_string(),
        code: code.to_string(),
        coordinates: Coordinates::default(),
        attributes: Vec::new(),
    }
}

#[test]
fn known_and_decorated_codes_are_valid() {
    let definition = definition();
    assert!(validate_point(&point(1, "TREE"), &definition).is_valid());
    assert!(validate_point(&point(2, "TREE/PIN"), &definition).is_valid());
    assert!(validate_point(&point(3, "PIN"), &definition).is_valid());
}

#[test]
fn unknown_code_is_invalid_with_reason() {
    let outcome = validate_point(&point(1, "XYZ"), &definition());
    assert_eq!(
        outcome,
        ValidationOutcome::Invalid {
            reason: InvalidReason::UnknownCode,
            field: PointField::Code,
            value: "XYZ".to_string(),
        }
    );
}

#[test]
fn validation_is_case_sensitive() {
    assert!(!validate_point(&point(1, "tree"), &definition()).is_valid());
    assert!(!validate_point(&point(1, "TREE/pin"), &definition()).is_valid());
}

#[test]
fn outcomes_preserve_order() {
    let points = vec![point(1, "TREE"), point(2, "XYZ"), point(3, "ROAD")];
    let outcomes = validate_points(&points, &definition());
    let valid: Vec<_> = outcomes.iter().map(ValidationOutcome::is_valid).collect();
    assert_eq!(valid, vec![true, false, true]);
}

#[test]
fn partition_reports_each_invalid_point_once() {
    let points = vec![
        point(1, "TREE"),
        point(2, "TREE/PIN"),
        point(3, "XYZ"),
        point(4, "ROAD+"),
    ];

    let result = partition_points("a.csv", points, &definition());

    let valid: Vec<_> = result.valid.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(valid, vec!["TREE", "TREE/PIN"]);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].value, "XYZ");
    assert_eq!(result.errors[0].record, 3);
    assert_eq!(result.errors[0].source_file, "a.csv");
    assert_eq!(result.errors[0].reason, InvalidReason::UnknownCode);
    assert_eq!(result.errors[1].value, "ROAD+");
}
