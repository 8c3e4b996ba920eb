//! Evaluation inputs

use lab_validator::{LabField, NormalizedPanel};
use serde::{Deserialize, Serialize};

/// Beta-2 transferrin (CSF marker) result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Beta2Transferrin {
    #[default]
    Unknown,
    Negative,
    Positive,
}

impl Beta2Transferrin {
    pub fn label(self) -> &'static str {
        match self {
            Beta2Transferrin::Unknown => "Unknown",
            Beta2Transferrin::Negative => "Negative",
            Beta2Transferrin::Positive => "Positive",
        }
    }
}

/// Yes/No answer; unanswered means No
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    #[default]
    No,
    Yes,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }

    pub fn label(self) -> &'static str {
        match self {
            Answer::No => "No",
            Answer::Yes => "Yes",
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// RAPID score components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RapidInputs {
    /// Renal impairment (urea > 7 mmol/L)
    pub renal_impairment: Answer,
    /// Age over 70
    pub age_over_70: Answer,
    /// Gross purulence of the fluid
    pub purulence: Answer,
    /// Hospital-acquired infection
    pub hospital_acquired: Answer,
    /// Serum albumin below 30 g/L
    pub low_serum_albumin: Answer,
}

impl RapidInputs {
    /// Components with their form labels, in scoring order
    pub fn components(&self) -> [(&'static str, Answer); 5] {
        [
            ("Renal (urea > 7 mmol/L)", self.renal_impairment),
            ("Age > 70", self.age_over_70),
            ("Purulence", self.purulence),
            ("Hospital-acquired", self.hospital_acquired),
            ("Serum albumin < 30 g/L", self.low_serum_albumin),
        ]
    }
}

/// Laboratory values for one evaluation
///
/// Every numeric field is optional; `None` means not entered (or rejected by
/// the normalizer) and is never read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabInput {
    pub serum_protein: Option<f64>,
    pub serum_albumin: Option<f64>,
    pub serum_ldh: Option<f64>,
    pub serum_ldh_uln: Option<f64>,
    pub serum_creatinine: Option<f64>,
    pub serum_hematocrit: Option<f64>,
    pub pf_protein: Option<f64>,
    pub pf_albumin: Option<f64>,
    pub pf_ldh: Option<f64>,
    pub pf_creatinine: Option<f64>,
    pub pf_ph: Option<f64>,
    pub pf_glucose: Option<f64>,
    pub pf_triglycerides: Option<f64>,
    pub pf_cholesterol: Option<f64>,
    pub pf_ada: Option<f64>,
    pub pf_hematocrit: Option<f64>,
    pub beta2_transferrin: Beta2Transferrin,
    pub rapid: RapidInputs,
}

impl LabInput {
    /// Build from a normalized panel
    pub fn from_panel(
        panel: &NormalizedPanel,
        beta2_transferrin: Beta2Transferrin,
        rapid: RapidInputs,
    ) -> Self {
        let mut input = Self {
            beta2_transferrin,
            rapid,
            ..Default::default()
        };
        for field in LabField::ALL {
            input.set(field, panel.get(field));
        }
        input
    }

    /// Value of a numeric field
    pub fn get(&self, field: LabField) -> Option<f64> {
        match field {
            LabField::SerumProtein => self.serum_protein,
            LabField::SerumAlbumin => self.serum_albumin,
            LabField::SerumLdh => self.serum_ldh,
            LabField::SerumLdhUln => self.serum_ldh_uln,
            LabField::SerumCreatinine => self.serum_creatinine,
            LabField::SerumHematocrit => self.serum_hematocrit,
            LabField::PfProtein => self.pf_protein,
            LabField::PfAlbumin => self.pf_albumin,
            LabField::PfLdh => self.pf_ldh,
            LabField::PfCreatinine => self.pf_creatinine,
            LabField::PfPh => self.pf_ph,
            LabField::PfGlucose => self.pf_glucose,
            LabField::PfTriglycerides => self.pf_triglycerides,
            LabField::PfCholesterol => self.pf_cholesterol,
            LabField::PfAda => self.pf_ada,
            LabField::PfHematocrit => self.pf_hematocrit,
        }
    }

    /// Set or clear a numeric field
    pub fn set(&mut self, field: LabField, value: Option<f64>) {
        let slot = match field {
            LabField::SerumProtein => &mut self.serum_protein,
            LabField::SerumAlbumin => &mut self.serum_albumin,
            LabField::SerumLdh => &mut self.serum_ldh,
            LabField::SerumLdhUln => &mut self.serum_ldh_uln,
            LabField::SerumCreatinine => &mut self.serum_creatinine,
            LabField::SerumHematocrit => &mut self.serum_hematocrit,
            LabField::PfProtein => &mut self.pf_protein,
            LabField::PfAlbumin => &mut self.pf_albumin,
            LabField::PfLdh => &mut self.pf_ldh,
            LabField::PfCreatinine => &mut self.pf_creatinine,
            LabField::PfPh => &mut self.pf_ph,
            LabField::PfGlucose => &mut self.pf_glucose,
            LabField::PfTriglycerides => &mut self.pf_triglycerides,
            LabField::PfCholesterol => &mut self.pf_cholesterol,
            LabField::PfAda => &mut self.pf_ada,
            LabField::PfHematocrit => &mut self.pf_hematocrit,
        };
        *slot = value;
    }

    /// Builder-style setter
    pub fn with(mut self, field: LabField, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }
}

/// Ratio of two optional values; `None` when either is missing or the
/// denominator is zero
pub(crate) fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (numerator, denominator) = (numerator?, denominator?);
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_cover_every_field() {
        let mut input = LabInput::default();
        for (i, field) in LabField::ALL.into_iter().enumerate() {
            assert_eq!(input.get(field), None);
            input.set(field, Some(i as f64));
        }
        for (i, field) in LabField::ALL.into_iter().enumerate() {
            assert_eq!(input.get(field), Some(i as f64));
        }
    }

    #[test]
    fn test_ratio_skips_zero_and_missing() {
        assert_eq!(ratio(Some(3.0), Some(0.0)), None);
        assert_eq!(ratio(None, Some(2.0)), None);
        assert_eq!(ratio(Some(3.0), None), None);
        assert_eq!(ratio(Some(3.0), Some(2.0)), Some(1.5));
    }

    #[test]
    fn test_unanswered_rapid_defaults_to_no() {
        let rapid: RapidInputs = serde_json::from_str(r#"{"purulence": "yes"}"#).unwrap();
        assert_eq!(rapid.purulence, Answer::Yes);
        assert_eq!(rapid.renal_impairment, Answer::No);
        assert_eq!(rapid.low_serum_albumin, Answer::No);
    }
}
