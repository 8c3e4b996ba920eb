//! Raw form intake
//!
//! Joins the normalizer to [`LabInput`]: rejected values become diagnostics and
//! are treated as missing by the engine.

use crate::input::{Beta2Transferrin, LabInput, RapidInputs};
use lab_validator::{LabField, Normalizer, RawValue, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Form payload as submitted by a client
///
/// Keys in `values` that are not lab fields are kept aside in
/// `ignored_fields` instead of failing the whole form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLabForm")]
pub struct RawLabInput {
    pub values: BTreeMap<LabField, RawValue>,
    pub beta2_transferrin: Beta2Transferrin,
    pub rapid: RapidInputs,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_fields: Vec<String>,
}

/// Wire shape of [`RawLabInput`], before field keys are resolved
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLabForm {
    values: BTreeMap<String, RawValue>,
    beta2_transferrin: Beta2Transferrin,
    rapid: RapidInputs,
}

impl From<RawLabForm> for RawLabInput {
    fn from(form: RawLabForm) -> Self {
        let mut values = BTreeMap::new();
        let mut ignored_fields = Vec::new();

        for (key, value) in form.values {
            match LabField::from_key(&key) {
                Some(field) => {
                    values.insert(field, value);
                }
                None => {
                    warn!("Ignoring unknown lab field {:?}", key);
                    ignored_fields.push(key);
                }
            }
        }

        Self {
            values,
            beta2_transferrin: form.beta2_transferrin,
            rapid: form.rapid,
            ignored_fields,
        }
    }
}

/// Normalized input with the diagnostics raised along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    pub input: LabInput,
    pub diagnostics: Vec<ValidationError>,
    /// Submitted keys that are not lab fields
    pub ignored_fields: Vec<String>,
}

impl Intake {
    pub fn from_raw(raw: &RawLabInput, normalizer: &Normalizer) -> Self {
        let panel = normalizer.normalize_panel(&raw.values);
        let input = LabInput::from_panel(&panel, raw.beta2_transferrin, raw.rapid);
        Self {
            input,
            diagnostics: panel.diagnostics,
            ignored_fields: raw.ignored_fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;
    use crate::input::Answer;

    #[test]
    fn test_json_form_to_input() {
        let raw: RawLabInput = serde_json::from_str(
            r#"{
                "values": {"serum_protein": "6.5", "pf_protein": 3.2, "pf_ph": ""},
                "beta2_transferrin": "positive",
                "rapid": {"age_over_70": "yes"}
            }"#,
        )
        .unwrap();
        let intake = Intake::from_raw(&raw, &Normalizer::default());
        assert_eq!(intake.input.serum_protein, Some(6.5));
        assert_eq!(intake.input.pf_protein, Some(3.2));
        assert_eq!(intake.input.pf_ph, None);
        assert_eq!(intake.input.beta2_transferrin, Beta2Transferrin::Positive);
        assert_eq!(intake.input.rapid.age_over_70, Answer::Yes);
        assert!(intake.diagnostics.is_empty());
    }

    #[test]
    fn test_out_of_range_value_is_missing_for_rules() {
        let mut raw = RawLabInput::default();
        raw.values.insert(LabField::PfPh, RawValue::Number(71.0));
        raw.values.insert(LabField::PfGlucose, RawValue::from("low"));

        let intake = Intake::from_raw(&raw, &Normalizer::default());
        assert_eq!(intake.input.pf_ph, None);
        assert_eq!(intake.diagnostics.len(), 2);
        assert!(evaluate(&intake.input).alerts.is_empty());
    }

    #[test]
    fn test_null_value_is_missing() {
        let raw: RawLabInput =
            serde_json::from_str(r#"{"values": {"pf_ph": null, "serum_protein": "6.5"}}"#)
                .unwrap();
        let intake = Intake::from_raw(&raw, &Normalizer::default());
        assert_eq!(intake.input.pf_ph, None);
        assert_eq!(intake.input.serum_protein, Some(6.5));
        assert!(intake.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_set_aside() {
        let raw: RawLabInput = serde_json::from_str(
            r#"{"values": {"pf_amylase": "120", "pf_ldh": 300, "Serum_Protein": 6.5}}"#,
        )
        .unwrap();
        assert_eq!(raw.ignored_fields, vec!["Serum_Protein", "pf_amylase"]);

        let intake = Intake::from_raw(&raw, &Normalizer::default());
        assert_eq!(intake.input.pf_ldh, Some(300.0));
        assert_eq!(intake.input.serum_protein, None);
        assert_eq!(intake.ignored_fields, raw.ignored_fields);
    }

    #[test]
    fn test_empty_payload_is_valid() {
        let raw: RawLabInput = serde_json::from_str("{}").unwrap();
        let intake = Intake::from_raw(&raw, &Normalizer::default());
        assert_eq!(intake.input, LabInput::default());
    }
}
