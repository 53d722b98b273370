use serde::{Deserialize, Serialize};

use super::enums::{ClinicalCategory, ExtractionMethod, Significance, TemplateCategory};

/// One extracted symptom, with provenance and the hints collected around it.
///
/// Created by the extractor, merged by the consolidator, located by the
/// anatomy inferrer. Frozen once the parse completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomCandidate {
    /// Canonical symptom name, e.g. `chest_pain`.
    pub name: String,
    pub medical_term: String,
    /// Surface text that produced the match.
    pub matched_text: String,
    pub anatomical_location: Option<String>,
    pub category: ClinicalCategory,
    pub confidence: f32,
    pub extraction_method: ExtractionMethod,
    /// Set only for pattern-pass candidates.
    pub template_category: Option<TemplateCategory>,
    pub significance: Significance,
    /// Byte range of the match in the analyzed text.
    pub span: (usize, usize),
    pub segment_index: usize,
    pub anatomical_hints: Vec<String>,
    pub severity_hints: Vec<String>,
    pub temporal_hints: Vec<String>,
    pub quality_hints: Vec<String>,
}

impl SymptomCandidate {
    pub fn is_direct(&self) -> bool {
        self.extraction_method == ExtractionMethod::DirectLookup
    }

    /// Merge another candidate's hints into this one, keeping first-seen order.
    pub fn absorb_hints(&mut self, other: &SymptomCandidate) {
        merge_unique(&mut self.anatomical_hints, &other.anatomical_hints);
        merge_unique(&mut self.severity_hints, &other.severity_hints);
        merge_unique(&mut self.temporal_hints, &other.temporal_hints);
        merge_unique(&mut self.quality_hints, &other.quality_hints);
    }

    /// Drop repeated entries inside each hint list.
    pub fn dedup_hints(&mut self) {
        for list in [
            &mut self.anatomical_hints,
            &mut self.severity_hints,
            &mut self.temporal_hints,
            &mut self.quality_hints,
        ] {
            let taken = std::mem::take(list);
            merge_unique(list, &taken);
        }
    }
}

fn merge_unique(target: &mut Vec<String>, source: &[String]) {
    for item in source {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn candidate(name: &str, confidence: f32, method: ExtractionMethod) -> SymptomCandidate {
        SymptomCandidate {
            name: name.to_string(),
            medical_term: name.replace('_', " "),
            matched_text: name.replace('_', " "),
            anatomical_location: None,
            category: ClinicalCategory::Other,
            confidence,
            extraction_method: method,
            template_category: None,
            significance: Significance::Routine,
            span: (0, name.len()),
            segment_index: 0,
            anatomical_hints: vec![],
            severity_hints: vec![],
            temporal_hints: vec![],
            quality_hints: vec![],
        }
    }
}
