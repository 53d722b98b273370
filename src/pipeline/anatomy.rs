//! Anatomical location per symptom, plus the utterance-level summary.

use crate::models::{AnatomicalAnalysis, ClinicalCategory, SymptomCandidate};
use crate::patterns::anatomy::regions_mentioned;
use crate::patterns::symptoms::symptom_entry;

use super::segmenter::Segment;

const EXPLICIT_CONFIDENCE: f32 = 0.85;
const DEFAULT_ONLY_CONFIDENCE: f32 = 0.6;

/// Set `anatomical_location` on every symptom and summarize.
///
/// A symptom takes its typical region when its own clause names it, else the
/// first region its clause names, else the typical region as a default.
pub fn locate_symptoms(
    symptoms: &mut [SymptomCandidate],
    segments: &[Segment],
) -> AnatomicalAnalysis {
    if symptoms.is_empty() {
        return AnatomicalAnalysis::empty();
    }

    let mut regions: Vec<String> = Vec::new();
    let mut systems: Vec<ClinicalCategory> = Vec::new();
    let mut explicit = false;

    for symptom in symptoms.iter_mut() {
        let typical = symptom_entry(&symptom.name).and_then(|e| e.typical_region);
        let mentioned = segments
            .get(symptom.segment_index)
            .map(|s| regions_mentioned(&s.text))
            .unwrap_or_default();

        let location = match typical {
            Some(region) if mentioned.contains(&region) => {
                explicit = true;
                Some(region)
            }
            _ => match mentioned.first() {
                Some(first) => {
                    explicit = true;
                    Some(*first)
                }
                None => typical,
            },
        };

        if let Some(region) = location {
            if !regions.iter().any(|r| r == region) {
                regions.push(region.to_string());
            }
        }
        symptom.anatomical_location = location.map(str::to_string);

        if !systems.contains(&symptom.category) {
            systems.push(symptom.category);
        }
    }

    AnatomicalAnalysis {
        regions,
        systems,
        explicit,
        confidence: if explicit { EXPLICIT_CONFIDENCE } else { DEFAULT_ONLY_CONFIDENCE },
    }
}
