//! Guideline-linked recommendations
//!
//! Order: one classification item, then one item per actionable alert in
//! alert order, then the RAPID item.

use crate::alerts::Alert;
use crate::lights::{FluidClass, LightsOutcome};
use crate::rapid::{RapidScore, RiskBand};
use crate::reference::{Reference, BTS_2023, LIGHT_1972, RAHMAN_2014, ROTH_1990};
use lab_validator::LabField;
use serde::{Deserialize, Serialize};

/// Suggested next step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "code")]
pub enum Recommendation {
    /// Transudate
    OptimiseSystemicDisease,
    /// Exudate without pseudo-exudate pattern
    ExudateWorkup,
    /// Pseudo-exudate; replaces the exudate work-up
    TreatUnderlyingDisease,
    /// Light's criteria could not be applied
    CollectLightsInputs { missing: Vec<LabField> },
    CtUrogram,
    UrgentThoracicSurgery,
    NeurosurgicalWorkup,
    ChylothoraxWorkup,
    TuberculosisTesting,
    /// RAPID 4-5
    EarlySurgicalReview,
}

impl Recommendation {
    pub fn code(&self) -> &'static str {
        match self {
            Recommendation::OptimiseSystemicDisease => "optimise_systemic_disease",
            Recommendation::ExudateWorkup => "exudate_workup",
            Recommendation::TreatUnderlyingDisease => "treat_underlying_disease",
            Recommendation::CollectLightsInputs { .. } => "collect_lights_inputs",
            Recommendation::CtUrogram => "ct_urogram",
            Recommendation::UrgentThoracicSurgery => "urgent_thoracic_surgery",
            Recommendation::NeurosurgicalWorkup => "neurosurgical_workup",
            Recommendation::ChylothoraxWorkup => "chylothorax_workup",
            Recommendation::TuberculosisTesting => "tuberculosis_testing",
            Recommendation::EarlySurgicalReview => "early_surgical_review",
        }
    }

    pub fn text(&self) -> String {
        match self {
            Recommendation::OptimiseSystemicDisease => {
                "Likely transudate: optimise the systemic condition (heart failure, cirrhosis, nephrotic syndrome).".into()
            }
            Recommendation::ExudateWorkup => {
                "Exudate: pursue aetiology work-up per the BTS 2023 pleural disease guideline.".into()
            }
            Recommendation::TreatUnderlyingDisease => {
                "Pseudo-exudate pattern: treat underlying heart, renal or hepatic disease; repeat the tap after diuretics are withheld if uncertain.".into()
            }
            Recommendation::CollectLightsInputs { missing } if missing.is_empty() => {
                "Light's criteria indeterminate (zero serum denominator): recheck serum protein and LDH values.".into()
            }
            Recommendation::CollectLightsInputs { missing } => {
                let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
                format!(
                    "Collect missing values before applying Light's criteria: {}.",
                    labels.join(", ")
                )
            }
            Recommendation::CtUrogram => {
                "Confirm with CT urogram; address urinary obstruction; consider a chest drain if large.".into()
            }
            Recommendation::UrgentThoracicSurgery => {
                "Urgent thoracic surgery consult; consider VATS evacuation if clotting.".into()
            }
            Recommendation::NeurosurgicalWorkup => {
                "Brain/spine imaging and neurosurgery consult for dural defect.".into()
            }
            Recommendation::ChylothoraxWorkup => {
                "Lipid panel with lipoprotein electrophoresis; start low-fat MCT diet.".into()
            }
            Recommendation::TuberculosisTesting => {
                "PF TB PCR/culture and/or pleural biopsy; start therapy if pre-test probability is high.".into()
            }
            Recommendation::EarlySurgicalReview => {
                "High RAPID score: early thoracic surgery review.".into()
            }
        }
    }

    /// Source the step is taken from
    pub fn reference(&self) -> Reference {
        match self {
            Recommendation::TreatUnderlyingDisease => ROTH_1990,
            Recommendation::CollectLightsInputs { .. } => LIGHT_1972,
            Recommendation::EarlySurgicalReview => RAHMAN_2014,
            Recommendation::OptimiseSystemicDisease
            | Recommendation::ExudateWorkup
            | Recommendation::CtUrogram
            | Recommendation::UrgentThoracicSurgery
            | Recommendation::NeurosurgicalWorkup
            | Recommendation::ChylothoraxWorkup
            | Recommendation::TuberculosisTesting => BTS_2023,
        }
    }

    /// Next step for an alert, if the alert has one
    pub fn for_alert(alert: Alert) -> Option<Self> {
        match alert {
            Alert::Urinothorax => Some(Recommendation::CtUrogram),
            Alert::Hemothorax => Some(Recommendation::UrgentThoracicSurgery),
            Alert::CsfLeak => Some(Recommendation::NeurosurgicalWorkup),
            Alert::Chylothorax => Some(Recommendation::ChylothoraxWorkup),
            Alert::TuberculousPleuritis => Some(Recommendation::TuberculosisTesting),
            Alert::LowPh | Alert::LowGlucose | Alert::HighCholesterol => None,
        }
    }
}

/// Classification-driven recommendation
fn for_classification(lights: &LightsOutcome, pseudo_exudate: bool) -> Recommendation {
    match lights.class {
        FluidClass::Exudate if pseudo_exudate => Recommendation::TreatUnderlyingDisease,
        FluidClass::Exudate => Recommendation::ExudateWorkup,
        FluidClass::Transudate => Recommendation::OptimiseSystemicDisease,
        FluidClass::Unknown => Recommendation::CollectLightsInputs {
            missing: lights.missing.clone(),
        },
    }
}

/// Build the ordered recommendation list
pub fn recommend(
    lights: &LightsOutcome,
    pseudo_exudate: bool,
    alerts: &[Alert],
    rapid: RapidScore,
) -> Vec<Recommendation> {
    let mut out = vec![for_classification(lights, pseudo_exudate)];
    out.extend(alerts.iter().copied().filter_map(Recommendation::for_alert));
    if rapid.band() == RiskBand::High {
        out.push(Recommendation::EarlySurgicalReview);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RapidInputs;

    fn outcome(class: FluidClass, missing: Vec<LabField>) -> LightsOutcome {
        LightsOutcome {
            protein_ratio: None,
            ldh_ratio: None,
            ldh_above_twice_uln: None,
            missing,
            class,
        }
    }

    fn no_rapid() -> RapidScore {
        RapidScore::from_inputs(&RapidInputs::default())
    }

    fn high_rapid() -> RapidScore {
        let yes = crate::input::Answer::Yes;
        RapidScore::from_inputs(&RapidInputs {
            renal_impairment: yes,
            age_over_70: yes,
            purulence: yes,
            hospital_acquired: yes,
            low_serum_albumin: yes,
        })
    }

    #[test]
    fn test_classification_items() {
        let cases = [
            (FluidClass::Exudate, false, Recommendation::ExudateWorkup),
            (FluidClass::Exudate, true, Recommendation::TreatUnderlyingDisease),
            (FluidClass::Transudate, false, Recommendation::OptimiseSystemicDisease),
        ];
        for (class, pseudo, expected) in cases {
            let recs = recommend(&outcome(class, vec![]), pseudo, &[], no_rapid());
            assert_eq!(recs, vec![expected]);
        }
    }

    #[test]
    fn test_pseudo_exudate_supersedes_exudate_workup() {
        let recs = recommend(&outcome(FluidClass::Exudate, vec![]), true, &[], no_rapid());
        assert!(!recs.contains(&Recommendation::ExudateWorkup));
    }

    #[test]
    fn test_unknown_names_missing_fields() {
        let lights = outcome(FluidClass::Unknown, vec![LabField::SerumLdh, LabField::SerumLdhUln]);
        let recs = recommend(&lights, false, &[], no_rapid());
        assert_eq!(recs[0].code(), "collect_lights_inputs");
        assert_eq!(
            recs[0].text(),
            "Collect missing values before applying Light's criteria: Serum LDH, Serum LDH upper limit of normal."
        );
    }

    #[test]
    fn test_zero_denominator_asks_for_recheck() {
        let recs = recommend(&outcome(FluidClass::Unknown, vec![]), false, &[], no_rapid());
        assert_eq!(recs, vec![Recommendation::CollectLightsInputs { missing: vec![] }]);
        assert!(recs[0]
            .text()
            .starts_with("Light's criteria indeterminate (zero serum denominator)"));
    }

    #[test]
    fn test_each_step_is_referenced() {
        assert_eq!(Recommendation::ExudateWorkup.reference(), BTS_2023);
        assert_eq!(Recommendation::TreatUnderlyingDisease.reference(), ROTH_1990);
        assert_eq!(
            Recommendation::CollectLightsInputs { missing: vec![] }.reference(),
            LIGHT_1972
        );
        assert_eq!(Recommendation::EarlySurgicalReview.reference(), RAHMAN_2014);
        assert_eq!(
            Recommendation::EarlySurgicalReview.reference().url,
            "https://pubmed.ncbi.nlm.nih.gov/24264558/"
        );
        assert_eq!(Recommendation::CtUrogram.reference(), BTS_2023);
    }

    #[test]
    fn test_full_ordering() {
        let alerts = [
            Alert::LowPh,
            Alert::Chylothorax,
            Alert::TuberculousPleuritis,
            Alert::Urinothorax,
            Alert::CsfLeak,
            Alert::Hemothorax,
        ];
        let recs = recommend(&outcome(FluidClass::Exudate, vec![]), false, &alerts, high_rapid());
        assert_eq!(
            recs,
            vec![
                Recommendation::ExudateWorkup,
                Recommendation::ChylothoraxWorkup,
                Recommendation::TuberculosisTesting,
                Recommendation::CtUrogram,
                Recommendation::NeurosurgicalWorkup,
                Recommendation::UrgentThoracicSurgery,
                Recommendation::EarlySurgicalReview,
            ]
        );
    }

    #[test]
    fn test_serialized_with_code_tag() {
        let json = serde_json::to_value(Recommendation::CollectLightsInputs {
            missing: vec![LabField::PfLdh],
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "collect_lights_inputs", "missing": ["pf_ldh"]})
        );
    }
}
