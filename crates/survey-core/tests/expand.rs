use proptest::prelude::*;

use survey_core::{expand_point, expand_points};
use survey_model::{ControlCodeDefinition, Coordinates, Decoration, Definition, RawPoint};

fn definition() -> Definition {
    Definition::new(
        ["TREE", "ROAD"],
        vec![ControlCodeDefinition::new("PIN", Decoration::default())],
        "+",
    )
}

fn raw(record: usize, code: &str) -> RawPoint {
    RawPoint {
        record,
        id: format!("P{record}"),
        code: code.to_string(),
        coordinates: Coordinates {
            northing: "5000.125".to_string(),
            easting: "2000.500".to_string(),
            elevation: "12.30".to_string(),
        },
        attributes: vec!["OAK".to_string(), "0.6".to_string()],
    }
}

#[test]
fn combined_code_expands_in_field_order() {
    let source = raw(1, "TREE/PIN+ROAD");
    let points = expand_point(&source, &definition());

    let codes: Vec<_> = points.iter().map(|point| point.code.as_str()).collect();
    assert_eq!(codes, vec!["TREE/PIN", "ROAD"]);
    for point in &points {
        assert_eq!(point.id, "P1");
        assert_eq!(point.coordinates, source.coordinates);
        assert_eq!(point.attributes, source.attributes);
    }
}

#[test]
fn constituents_are_trimmed() {
    let points = expand_point(&raw(1, "TREE + ROAD"), &definition());
    let codes: Vec<_> = points.iter().map(|point| point.code.as_str()).collect();
    assert_eq!(codes, vec!["TREE", "ROAD"]);
}

#[test]
fn plain_code_is_a_single_point() {
    let points = expand_point(&raw(1, "TREE/PIN"), &definition());
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].code, "TREE/PIN");
}

#[test]
fn ill_formed_combinations_pass_through() {
    for code in ["TREE+", "+ROAD", "+", "TREE++ROAD", "TREE+ +ROAD"] {
        let points = expand_point(&raw(1, code), &definition());
        assert_eq!(points.len(), 1, "{code}");
        assert_eq!(points[0].code, code);
    }
}

#[test]
fn unknown_constituents_are_still_expanded() {
    let points = expand_point(&raw(1, "TREE+XYZ"), &definition());
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].code, "XYZ");
}

#[test]
fn expand_points_keeps_record_order() {
    let raws = vec![raw(1, "TREE+ROAD"), raw(2, "ROAD"), raw(3, "TREE")];
    let points = expand_points(&raws, &definition());
    let records: Vec<_> = points.iter().map(|point| point.record).collect();
    assert_eq!(records, vec![1, 1, 2, 3]);
}

fn combined_code() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![Just("TREE"), Just("ROAD"), Just("PIN"), Just("/"), Just("+"), Just("Q")],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn expansion_never_shrinks_and_preserves_fields(code in combined_code()) {
        let source = raw(9, &code);
        let points = expand_point(&source, &definition());

        prop_assert!(!points.is_empty());
        for point in &points {
            prop_assert_eq!(&point.coordinates, &source.coordinates);
            prop_assert_eq!(&point.attributes, &source.attributes);
            prop_assert_eq!(&point.id, &source.id);
            prop_assert_eq!(point.record, source.record);
        }
        let rejoined = points
            .iter()
            .map(|point| point.code.as_str())
            .collect::<Vec<_>>()
            .join("+");
        prop_assert_eq!(rejoined, code);
    }
}
