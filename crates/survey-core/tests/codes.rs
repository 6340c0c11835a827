use proptest::prelude::*;

use survey_core::{normalize_code, strip_control_decoration};
use survey_model::{ControlCodeDefinition, Decoration, Definition, Placement};

fn site_definition() -> Definition {
    Definition::new(
        ["TREE", "ROAD", "TREE/X"],
        vec![
            ControlCodeDefinition::new("PIN", Decoration::default()),
            ControlCodeDefinition::new(
                "B",
                Decoration {
                    separator: " ".to_string(),
                    placement: Placement::Prefix,
                },
            ),
        ],
        "+",
    )
}

#[test]
fn exact_feature_code_is_unchanged() {
    let definition = site_definition();
    assert_eq!(normalize_code("TREE", &definition), "TREE");
    // A feature code that looks decorated is still an exact match.
    assert_eq!(normalize_code("TREE/X", &definition), "TREE/X");
}

#[test]
fn decorated_feature_code_is_stripped() {
    let definition = site_definition();
    assert_eq!(normalize_code("TREE/PIN", &definition), "TREE");
    assert_eq!(normalize_code("B ROAD", &definition), "ROAD");
    assert_eq!(normalize_code("B ROAD/PIN/PIN", &definition), "ROAD");
    assert_eq!(normalize_code("TREE/X/PIN", &definition), "TREE/X");
}

#[test]
fn unmatched_codes_pass_through() {
    let definition = site_definition();
    assert_eq!(normalize_code("XYZ", &definition), "XYZ");
    assert_eq!(normalize_code("XYZ/PIN", &definition), "XYZ/PIN");
    assert_eq!(normalize_code("PIN", &definition), "PIN");
    assert_eq!(normalize_code("tree/PIN", &definition), "tree/PIN");
    assert_eq!(normalize_code("", &definition), "");
}

#[test]
fn free_function_matches_definition_helper() {
    let definition = site_definition();
    let stripped = strip_control_decoration(
        "TREE/PIN",
        definition.feature_codes(),
        definition.control_codes(),
    );
    assert_eq!(stripped, normalize_code("TREE/PIN", &definition));
}

fn code_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("TREE"),
            Just("ROAD"),
            Just("PIN"),
            Just("B"),
            Just("X"),
            Just("/"),
            Just(" "),
        ],
        0..7,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn normalization_is_idempotent(code in code_strategy()) {
        let definition = site_definition();
        let once = normalize_code(&code, &definition);
        let twice = normalize_code(&once, &definition);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn normalization_is_idempotent_for_arbitrary_text(code in "\\PC{0,12}") {
        let definition = site_definition();
        let once = normalize_code(&code, &definition);
        prop_assert_eq!(normalize_code(&once, &definition), once);
    }

    #[test]
    fn normalization_yields_feature_or_input(code in code_strategy()) {
        let definition = site_definition();
        let normalized = normalize_code(&code, &definition);
        prop_assert!(normalized == code || definition.is_known_feature_code(&normalized));
    }
}
