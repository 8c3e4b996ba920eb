//! Laboratory Field Catalogue

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric laboratory fields accepted by the work-up form
///
/// Declaration order is the catalogue order used for diagnostics and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabField {
    SerumProtein,
    SerumAlbumin,
    SerumLdh,
    SerumLdhUln,
    SerumCreatinine,
    SerumHematocrit,
    PfProtein,
    PfAlbumin,
    PfLdh,
    PfCreatinine,
    PfPh,
    PfGlucose,
    PfTriglycerides,
    PfCholesterol,
    PfAda,
    PfHematocrit,
}

impl LabField {
    /// All fields in catalogue order
    pub const ALL: [LabField; 16] = [
        LabField::SerumProtein,
        LabField::SerumAlbumin,
        LabField::SerumLdh,
        LabField::SerumLdhUln,
        LabField::SerumCreatinine,
        LabField::SerumHematocrit,
        LabField::PfProtein,
        LabField::PfAlbumin,
        LabField::PfLdh,
        LabField::PfCreatinine,
        LabField::PfPh,
        LabField::PfGlucose,
        LabField::PfTriglycerides,
        LabField::PfCholesterol,
        LabField::PfAda,
        LabField::PfHematocrit,
    ];

    /// Stable machine key, identical to the serde representation
    pub fn key(self) -> &'static str {
        match self {
            LabField::SerumProtein => "serum_protein",
            LabField::SerumAlbumin => "serum_albumin",
            LabField::SerumLdh => "serum_ldh",
            LabField::SerumLdhUln => "serum_ldh_uln",
            LabField::SerumCreatinine => "serum_creatinine",
            LabField::SerumHematocrit => "serum_hematocrit",
            LabField::PfProtein => "pf_protein",
            LabField::PfAlbumin => "pf_albumin",
            LabField::PfLdh => "pf_ldh",
            LabField::PfCreatinine => "pf_creatinine",
            LabField::PfPh => "pf_ph",
            LabField::PfGlucose => "pf_glucose",
            LabField::PfTriglycerides => "pf_triglycerides",
            LabField::PfCholesterol => "pf_cholesterol",
            LabField::PfAda => "pf_ada",
            LabField::PfHematocrit => "pf_hematocrit",
        }
    }

    /// Reverse of [`LabField::key`]
    pub fn from_key(key: &str) -> Option<LabField> {
        LabField::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            LabField::SerumProtein => "Serum protein",
            LabField::SerumAlbumin => "Serum albumin",
            LabField::SerumLdh => "Serum LDH",
            LabField::SerumLdhUln => "Serum LDH upper limit of normal",
            LabField::SerumCreatinine => "Serum creatinine",
            LabField::SerumHematocrit => "Serum hematocrit",
            LabField::PfProtein => "PF protein",
            LabField::PfAlbumin => "PF albumin",
            LabField::PfLdh => "PF LDH",
            LabField::PfCreatinine => "PF creatinine",
            LabField::PfPh => "PF pH",
            LabField::PfGlucose => "PF glucose",
            LabField::PfTriglycerides => "PF triglycerides",
            LabField::PfCholesterol => "PF cholesterol",
            LabField::PfAda => "PF ADA",
            LabField::PfHematocrit => "PF hematocrit",
        }
    }

    /// Unit of measure; empty for pH
    pub fn unit(self) -> &'static str {
        match self {
            LabField::SerumProtein
            | LabField::SerumAlbumin
            | LabField::PfProtein
            | LabField::PfAlbumin => "g/dL",
            LabField::SerumLdh | LabField::SerumLdhUln | LabField::PfLdh | LabField::PfAda => "U/L",
            LabField::SerumCreatinine
            | LabField::PfCreatinine
            | LabField::PfGlucose
            | LabField::PfTriglycerides
            | LabField::PfCholesterol => "mg/dL",
            LabField::SerumHematocrit | LabField::PfHematocrit => "%",
            LabField::PfPh => "",
        }
    }

    /// Label with the unit in parentheses, e.g. `PF LDH (U/L)`
    pub fn label_with_unit(self) -> String {
        match self.unit() {
            "" => self.label().to_string(),
            unit => format!("{} ({})", self.label(), unit),
        }
    }
}

impl fmt::Display for LabField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_is_sorted_and_unique() {
        let mut sorted = LabField::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, LabField::ALL.to_vec());
    }

    #[test]
    fn test_key_matches_serde() {
        for field in LabField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
    }

    #[test]
    fn test_from_key() {
        for field in LabField::ALL {
            assert_eq!(LabField::from_key(field.key()), Some(field));
        }
        assert_eq!(LabField::from_key("pf_amylase"), None);
        assert_eq!(LabField::from_key("PF_PH"), None);
    }

    #[test]
    fn test_label_with_unit() {
        assert_eq!(LabField::PfLdh.label_with_unit(), "PF LDH (U/L)");
        assert_eq!(LabField::PfPh.label_with_unit(), "PF pH");
    }
}
