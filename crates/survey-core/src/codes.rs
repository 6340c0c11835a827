//! Control-code normalization.
//!
//! A field code is a feature code optionally wrapped in control-code
//! decorations, e.g. `TREE/PIN` or `END ROAD`. Normalization peels those
//! decorations off until a known feature code remains.

use std::collections::BTreeSet;

use survey_model::{ControlCodeDefinition, Definition};

/// Feature code reachable from `code` by removing control-code decorations.
///
/// Control codes are tried in definition order and decorations may be stacked
/// (`TREE/PIN/PIN`). Returns `None` when no known feature code is reachable.
pub fn resolve_feature_code<'a>(
    code: &'a str,
    feature_codes: &BTreeSet<String>,
    control_codes: &[ControlCodeDefinition],
) -> Option<&'a str> {
    if feature_codes.contains(code) {
        return Some(code);
    }
    control_codes
        .iter()
        .filter_map(|control| control.strip_from(code))
        .find_map(|rest| resolve_feature_code(rest, feature_codes, control_codes))
}

/// Strip control-code decoration from `code`.
///
/// Exact feature codes come back unchanged, decorated feature codes come back
/// as their feature code, and anything else is passed through verbatim. Never
/// fails and is idempotent.
pub fn strip_control_decoration(
    code: &str,
    feature_codes: &BTreeSet<String>,
    control_codes: &[ControlCodeDefinition],
) -> String {
    resolve_feature_code(code, feature_codes, control_codes)
        .unwrap_or(code)
        .to_string()
}

/// [`strip_control_decoration`] against a loaded definition.
pub fn normalize_code(code: &str, definition: &Definition) -> String {
    strip_control_decoration(code, definition.feature_codes(), definition.control_codes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::{Decoration, Placement};

    fn features() -> BTreeSet<String> {
        ["TREE", "ROAD"].into_iter().map(String::from).collect()
    }

    #[test]
    fn stacked_prefix_and_suffix_decorations() {
        let controls = vec![
            ControlCodeDefinition::new("PIN", Decoration::default()),
            ControlCodeDefinition::new(
                "END",
                Decoration {
                    separator: " ".to_string(),
                    placement: Placement::Prefix,
                },
            ),
        ];
        assert_eq!(
            resolve_feature_code("END ROAD/PIN", &features(), &controls),
            Some("ROAD")
        );
        assert_eq!(resolve_feature_code("END", &features(), &controls), None);
    }
}
