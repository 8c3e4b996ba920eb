//! Literature behind each decision step

use serde::Serialize;

/// Citation with its PubMed link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    pub citation: &'static str,
    pub url: &'static str,
}

/// Light's criteria
pub const LIGHT_1972: Reference = Reference {
    citation: "Light RW et al. 1972, Ann Intern Med",
    url: "https://pubmed.ncbi.nlm.nih.gov/4642731/",
};

/// Albumin gradient for pseudo-exudates
pub const ROTH_1990: Reference = Reference {
    citation: "Roth BJ et al. 1990, Chest",
    url: "https://pubmed.ncbi.nlm.nih.gov/2152757/",
};

/// RAPID score
pub const RAHMAN_2014: Reference = Reference {
    citation: "Rahman NM et al. 2014, Thorax",
    url: "https://pubmed.ncbi.nlm.nih.gov/24264558/",
};

/// BTS pleural disease guideline
pub const BTS_2023: Reference = Reference {
    citation: "BTS Pleural Disease Guideline 2023",
    url: "https://pubmed.ncbi.nlm.nih.gov/37553157/",
};

impl Reference {
    /// `citation <url>` as printed in reports
    pub fn display(self) -> String {
        format!("{} <{}>", self.citation, self.url)
    }
}
