//! The experiment configuration surface (`experiments/conf.py::Config`):
//! which generalization/suppression modes are enabled, and how admissible
//! (`A`) and inadmissible (`I`) attributes map onto the quasi-identifier set
//! versus the partitioning grouping key.
//!
//! These enums are the typed surface a sweep-loop binary would parse its
//! `mode`/`qi` positionals into; this crate does not parse `argv` itself.

use crate::error::DriverError;

/// Which combination of generalization and suppression a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnonMode {
    /// `"G"`: generalization only.
    Generalization,
    /// `"S"`: suppression only, no search.
    Suppression,
    /// `"GS"`: generalization with a suppression fallback for undersized
    /// classes.
    GeneralizationSuppression,
}

impl AnonMode {
    /// Parse one of the three canonical mode strings.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidConfig`] for anything other than `"G"`,
    /// `"S"`, or `"GS"`.
    pub fn parse(mode: &str) -> Result<Self, DriverError> {
        match mode {
            "G" => Ok(Self::Generalization),
            "S" => Ok(Self::Suppression),
            "GS" => Ok(Self::GeneralizationSuppression),
            other => Err(DriverError::InvalidConfig { detail: format!("unknown mode: {other}") }),
        }
    }

    #[must_use]
    pub fn use_generalization(self) -> bool {
        matches!(self, Self::Generalization | Self::GeneralizationSuppression)
    }

    #[must_use]
    pub fn use_suppression(self) -> bool {
        matches!(self, Self::Suppression | Self::GeneralizationSuppression)
    }
}

/// How admissible (`A`) and inadmissible (`I`) attributes split between the
/// anonymizer's quasi-identifier set and its partitioning grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QiMap {
    /// `"AI"`: anonymize `A`, partition by `I`.
    AdmissibleInadmissible,
    /// `"A"`: anonymize `A`, no partitioning.
    Admissible,
    /// `"I"`: anonymize `I`, no partitioning.
    Inadmissible,
}

impl QiMap {
    /// Parse one of the three canonical qi-map strings.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidConfig`] for anything other than
    /// `"AI"`, `"A"`, or `"I"`.
    pub fn parse(qi: &str) -> Result<Self, DriverError> {
        match qi {
            "AI" => Ok(Self::AdmissibleInadmissible),
            "A" => Ok(Self::Admissible),
            "I" => Ok(Self::Inadmissible),
            other => Err(DriverError::InvalidConfig { detail: format!("unknown qi_map: {other}") }),
        }
    }

    /// Split admissible/inadmissible attribute lists into `(quasi_identifiers,
    /// grouping_keys)` per this mapping.
    #[must_use]
    pub fn split(self, admissible: &[String], inadmissible: &[String]) -> (Vec<String>, Vec<String>) {
        match self {
            Self::AdmissibleInadmissible => (admissible.to_vec(), inadmissible.to_vec()),
            Self::Admissible => (admissible.to_vec(), Vec::new()),
            Self::Inadmissible => (inadmissible.to_vec(), Vec::new()),
        }
    }
}
