//! FXL definition loading.
//!
//! An FXL file is an XML document rooted at `FeatureDefinition`. Feature codes
//! come from the `Code` attribute of point, line, polygon and block
//! definitions; control codes come from `ControlCodeDefinition` elements.
//!
//! ```xml
//! <FeatureDefinition>
//!   <FeatureDefinitions>
//!     <PointDefinition Code="TREE" />
//!     <LineDefinition Code="ROAD" />
//!   </FeatureDefinitions>
//!   <ControlCodeDefinitions>
//!     <ControlCodeDefinition Code="PIN" Action="StartJoinSequence" />
//!     <ControlCodeDefinition Code="END" Separator=" " Placement="Prefix" />
//!   </ControlCodeDefinitions>
//! </FeatureDefinition>
//! ```
//!
//! `Separator` and `Placement` are optional; control codes without them use the
//! decoration configured in [`FxlOptions`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use tracing::debug;

use survey_model::{ControlCodeDefinition, Decoration, Definition, Placement};

use crate::error::{DefinitionError, Result};

const ROOT_ELEMENT: &str = "FeatureDefinition";
const CONTROL_ELEMENT: &str = "ControlCodeDefinition";
const FEATURE_ELEMENTS: [&str; 4] = [
    "PointDefinition",
    "LineDefinition",
    "PolygonDefinition",
    "BlockDefinition",
];

/// Syntax settings not carried by the FXL format itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FxlOptions {
    /// Separator that stacks several point codes in one record.
    pub combination_separator: String,
    /// Decoration for control codes that do not declare their own.
    pub decoration: Decoration,
}

impl Default for FxlOptions {
    fn default() -> Self {
        Self {
            combination_separator: "+".to_string(),
            decoration: Decoration::default(),
        }
    }
}

/// Source of the job vocabulary for a run.
pub trait DefinitionLoader {
    fn load(&self, path: &Path) -> Result<Definition>;
}

/// Loads definitions from `.fxl` files.
#[derive(Debug, Clone, Default)]
pub struct FxlLoader {
    options: FxlOptions,
}

impl FxlLoader {
    pub fn new(options: FxlOptions) -> Self {
        Self { options }
    }
}

impl DefinitionLoader for FxlLoader {
    fn load(&self, path: &Path) -> Result<Definition> {
        load_definition(path, &self.options)
    }
}

/// Read and parse the definition at `path`.
pub fn load_definition(path: &Path, options: &FxlOptions) -> Result<Definition> {
    let is_fxl = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fxl"));
    if !is_fxl {
        return Err(DefinitionError::Extension {
            path: path.to_path_buf(),
        });
    }
    let xml = std::fs::read_to_string(path).map_err(|source| DefinitionError::io(path, source))?;
    let definition = parse_definition(&xml, path, options)?;
    debug!(
        path = %path.display(),
        feature_count = definition.feature_codes().len(),
        control_count = definition.control_codes().len(),
        "definition loaded"
    );
    Ok(definition)
}

/// Parse FXL text. `source` is only used in error messages.
pub fn parse_definition(xml: &str, source: &Path, options: &FxlOptions) -> Result<Definition> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut saw_root = false;
    let mut first_element = true;
    let mut feature_codes = BTreeSet::new();
    let mut control_codes: Vec<ControlCodeDefinition> = Vec::new();

    loop {
        let element = match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => element,
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(error) => {
                return Err(DefinitionError::Xml {
                    path: source.to_path_buf(),
                    position: reader.error_position(),
                    message: error.to_string(),
                });
            }
        };
        let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
        if first_element {
            first_element = false;
            if name != ROOT_ELEMENT {
                return Err(DefinitionError::MissingRoot {
                    path: source.to_path_buf(),
                });
            }
            saw_root = true;
            continue;
        }
        if FEATURE_ELEMENTS.contains(&name.as_str()) {
            let attributes = read_attributes(&reader, &element, source)?;
            let code = required_code(&attributes, &name, source)?;
            if !feature_codes.insert(code.clone()) {
                return Err(DefinitionError::DuplicateFeatureCode {
                    code,
                    path: source.to_path_buf(),
                });
            }
        } else if name == CONTROL_ELEMENT {
            let attributes = read_attributes(&reader, &element, source)?;
            let control = control_definition(&attributes, source, options)?;
            if control_codes
                .iter()
                .any(|existing| existing.code == control.code)
            {
                return Err(DefinitionError::DuplicateControlCode {
                    code: control.code,
                    path: source.to_path_buf(),
                });
            }
            control_codes.push(control);
        }
    }

    if !saw_root {
        return Err(DefinitionError::MissingRoot {
            path: source.to_path_buf(),
        });
    }
    if feature_codes.is_empty() {
        return Err(DefinitionError::NoFeatureCodes {
            path: source.to_path_buf(),
        });
    }
    if let Some(control) = control_codes
        .iter()
        .find(|control| feature_codes.contains(&control.code))
    {
        return Err(DefinitionError::AmbiguousCode {
            code: control.code.clone(),
            path: source.to_path_buf(),
        });
    }

    Ok(Definition::new(
        feature_codes,
        control_codes,
        options.combination_separator.clone(),
    ))
}

fn read_attributes(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
    source: &Path,
) -> Result<BTreeMap<String, String>> {
    let xml_error = |message: String| DefinitionError::Xml {
        path: source.to_path_buf(),
        position: reader.buffer_position(),
        message,
    };
    let mut attributes = BTreeMap::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|error| xml_error(error.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(|error| xml_error(error.to_string()))?;
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}

fn required_code(
    attributes: &BTreeMap<String, String>,
    element: &str,
    source: &Path,
) -> Result<String> {
    attributes
        .get("Code")
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DefinitionError::MissingCode {
            element: element.to_string(),
            path: source.to_path_buf(),
        })
}

fn control_definition(
    attributes: &BTreeMap<String, String>,
    source: &Path,
    options: &FxlOptions,
) -> Result<ControlCodeDefinition> {
    let code = required_code(attributes, CONTROL_ELEMENT, source)?;
    let mut decoration = options.decoration.clone();
    // Separators may be whitespace, so they are taken untrimmed.
    if let Some(separator) = attributes.get("Separator") {
        decoration.separator = separator.clone();
    }
    if decoration.separator.is_empty() {
        return Err(DefinitionError::EmptySeparator {
            code,
            path: source.to_path_buf(),
        });
    }
    if let Some(raw) = attributes.get("Placement") {
        decoration.placement = parse_placement(raw).ok_or_else(|| {
            DefinitionError::InvalidPlacement {
                code: code.clone(),
                value: raw.clone(),
                path: source.to_path_buf(),
            }
        })?;
    }
    let mut control = ControlCodeDefinition::new(code, decoration);
    if let Some(action) = attributes
        .get("Action")
        .map(|action| action.trim())
        .filter(|action| !action.is_empty())
    {
        control = control.with_action(action);
    }
    Ok(control)
}

fn parse_placement(raw: &str) -> Option<Placement> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "suffix" => Some(Placement::Suffix),
        "prefix" => Some(Placement::Prefix),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placement_case_insensitively() {
        assert_eq!(parse_placement("Prefix"), Some(Placement::Prefix));
        assert_eq!(parse_placement(" SUFFIX "), Some(Placement::Suffix));
        assert_eq!(parse_placement("middle"), None);
    }

    #[test]
    fn attribute_separator_overrides_default() {
        let mut attributes = BTreeMap::new();
        attributes.insert("Code".to_string(), "END".to_string());
        attributes.insert("Separator".to_string(), "-".to_string());
        let control =
            control_definition(&attributes, Path::new("job.fxl"), &FxlOptions::default())
                .expect("control definition");
        assert_eq!(control.decoration.separator, "-");
        assert_eq!(control.decoration.placement, Placement::Suffix);
        assert!(control.action.is_none());
    }
}
