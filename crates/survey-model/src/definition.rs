//! Feature/control-code vocabulary for a survey job.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a control code sits relative to the code it decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// `FEATURE<sep>CONTROL`, e.g. `TREE/PIN`.
    #[default]
    Suffix,
    /// `CONTROL<sep>FEATURE`, e.g. `PIN/TREE`.
    Prefix,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Suffix => f.write_str("suffix"),
            Placement::Prefix => f.write_str("prefix"),
        }
    }
}

/// How a control code is attached to a code in the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Decoration {
    pub separator: String,
    #[serde(default)]
    pub placement: Placement,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            separator: "/".to_string(),
            placement: Placement::Suffix,
        }
    }
}

/// A control code plus the pattern used to attach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCodeDefinition {
    pub code: String,
    /// Field-software action (e.g. `StartJoinSequence`); informational only.
    pub action: Option<String>,
    pub decoration: Decoration,
}

impl ControlCodeDefinition {
    pub fn new(code: impl Into<String>, decoration: Decoration) -> Self {
        Self {
            code: code.into(),
            action: None,
            decoration,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Remove one occurrence of this control code's decoration from `code`.
    ///
    /// Returns the remaining code, or `None` when the decoration is absent or
    /// nothing would remain. The result is always shorter than `code`.
    pub fn strip_from<'a>(&self, code: &'a str) -> Option<&'a str> {
        let separator = self.decoration.separator.as_str();
        let rest = match self.decoration.placement {
            Placement::Suffix => code
                .strip_suffix(self.code.as_str())?
                .strip_suffix(separator)?,
            Placement::Prefix => code
                .strip_prefix(self.code.as_str())?
                .strip_prefix(separator)?,
        };
        if rest.is_empty() || rest.len() == code.len() {
            None
        } else {
            Some(rest)
        }
    }
}

/// Parsed vocabulary of a job. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    feature_codes: BTreeSet<String>,
    control_codes: Vec<ControlCodeDefinition>,
    combination_separator: String,
}

impl Definition {
    pub fn new<I, S>(
        feature_codes: I,
        control_codes: Vec<ControlCodeDefinition>,
        combination_separator: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            feature_codes: feature_codes.into_iter().map(Into::into).collect(),
            control_codes,
            combination_separator: combination_separator.into(),
        }
    }

    pub fn is_known_feature_code(&self, code: &str) -> bool {
        self.feature_codes.contains(code)
    }

    pub fn is_control_code(&self, code: &str) -> bool {
        self.control_codes.iter().any(|control| control.code == code)
    }

    pub fn feature_codes(&self) -> &BTreeSet<String> {
        &self.feature_codes
    }

    pub fn control_codes(&self) -> &[ControlCodeDefinition] {
        &self.control_codes
    }

    /// Separator that stacks several point codes in one record.
    pub fn combination_separator(&self) -> &str {
        &self.combination_separator
    }
}
