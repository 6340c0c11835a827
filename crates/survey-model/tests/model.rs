use survey_model::{
    ControlCodeDefinition, Coordinates, Decoration, Definition, ExpandedPoint, InvalidReason,
    Placement, PointError, PointField, RawPoint, SurveyFile, ValidationOutcome,
};

fn raw(code: &str) -> RawPoint {
    RawPoint {
        record: 3,
        id: "101".to_string(),
        code: code.to_string(),
        coordinates: Coordinates {
            northing: "5000.125".to_string(),
            easting: "2000.500".to_string(),
            elevation: "12.30".to_string(),
        },
        attributes: vec!["OAK".to_string()],
    }
}

#[test]
fn suffix_decoration_strips_trailing_control() {
    let pin = ControlCodeDefinition::new("PIN", Decoration::default());
    assert_eq!(pin.strip_from("TREE/PIN"), Some("TREE"));
    assert_eq!(pin.strip_from("TREE/PIN/PIN"), Some("TREE/PIN"));
    assert_eq!(pin.strip_from("TREEPIN"), None);
    assert_eq!(pin.strip_from("/PIN"), None);
    assert_eq!(pin.strip_from("PIN"), None);
}

#[test]
fn prefix_decoration_strips_leading_control() {
    let start = ControlCodeDefinition::new(
        "ST",
        Decoration {
            separator: " ".to_string(),
            placement: Placement::Prefix,
        },
    )
    .with_action("StartJoinSequence");
    assert_eq!(start.strip_from("ST ROAD"), Some("ROAD"));
    assert_eq!(start.strip_from("ROAD ST"), None);
    assert_eq!(start.action.as_deref(), Some("StartJoinSequence"));
}

#[test]
fn definition_answers_membership_queries() {
    let definition = Definition::new(
        ["TREE", "ROAD"],
        vec![ControlCodeDefinition::new("PIN", Decoration::default())],
        "+",
    );
    assert!(definition.is_known_feature_code("TREE"));
    assert!(!definition.is_known_feature_code("tree"));
    assert!(!definition.is_known_feature_code("PIN"));
    assert!(definition.is_control_code("PIN"));
    assert_eq!(
        definition.feature_codes().iter().collect::<Vec<_>>(),
        vec!["ROAD", "TREE"]
    );
    assert_eq!(definition.control_codes().len(), 1);
    assert_eq!(definition.combination_separator(), "+");
}

#[test]
fn expanded_point_keeps_raw_fields() {
    let source = raw("TREE+ROAD");
    let point = ExpandedPoint::from_raw(&source, "ROAD");
    assert_eq!(point.code, "ROAD");
    assert_eq!(point.coordinates, source.coordinates);
    assert_eq!(point.attributes, source.attributes);
    assert_eq!(point.record, 3);

    let whole: ExpandedPoint = source.clone().into();
    assert_eq!(whole.code, "TREE+ROAD");
}

#[test]
fn point_error_only_for_invalid_outcomes() {
    let point = ExpandedPoint::from(raw("XYZ"));
    assert!(PointError::from_outcome("a.csv", &point, &ValidationOutcome::Valid).is_none());

    let outcome = ValidationOutcome::Invalid {
        reason: InvalidReason::UnknownCode,
        field: PointField::Code,
        value: "XYZ".to_string(),
    };
    let error = PointError::from_outcome("a.csv", &point, &outcome).expect("point error");
    assert_eq!(error.source_file, "a.csv");
    assert_eq!(error.point_id, "101");
    assert_eq!(error.record, 3);
    assert_eq!(error.reason.to_string(), "UnknownCode");
    assert_eq!(error.field.to_string(), "code");
}

#[test]
fn survey_file_uses_base_name() {
    let file = SurveyFile::new("/jobs/site-a/day1.csv", vec![]);
    assert_eq!(file.name, "day1.csv");
    assert!(!file.has_points());
}
