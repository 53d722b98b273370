//! Merge raw candidates into at most one record per canonical symptom.

use std::collections::HashMap;

use crate::models::SymptomCandidate;

/// Keep the strongest candidate per name (direct pass wins ties), union
/// every hint list, and order by position in the text.
///
/// Running this over its own output returns the same list.
pub fn consolidate(candidates: Vec<SymptomCandidate>) -> Vec<SymptomCandidate> {
    let mut by_name: HashMap<String, SymptomCandidate> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for candidate in candidates {
        match by_name.get_mut(&candidate.name) {
            None => {
                order.push(candidate.name.clone());
                by_name.insert(candidate.name.clone(), candidate);
            }
            Some(kept) => {
                if outranks(&candidate, kept) {
                    let mut winner = candidate;
                    winner.absorb_hints(kept);
                    *kept = winner;
                } else {
                    kept.absorb_hints(&candidate);
                }
            }
        }
    }

    let mut merged: Vec<SymptomCandidate> = order
        .into_iter()
        .filter_map(|name| by_name.remove(&name))
        .map(|mut c| {
            c.dedup_hints();
            c
        })
        .collect();
    merged.sort_by(|a, b| a.span.0.cmp(&b.span.0).then_with(|| a.name.cmp(&b.name)));
    merged
}

fn outranks(challenger: &SymptomCandidate, kept: &SymptomCandidate) -> bool {
    if challenger.confidence > kept.confidence {
        return true;
    }
    challenger.confidence == kept.confidence && challenger.is_direct() && !kept.is_direct()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symptom::test_support::candidate;
    use crate::models::ExtractionMethod::{DirectLookup, PatternMatch};

    #[test]
    fn keeps_highest_confidence_per_name() {
        let low = candidate("headache", 0.6, PatternMatch);
        let high = candidate("headache", 0.85, DirectLookup);
        let merged = consolidate(vec![low, high]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, 0.85);
        assert_eq!(merged[0].extraction_method, DirectLookup);
    }

    #[test]
    fn direct_pass_wins_ties() {
        let pattern = candidate("insomnia", 0.75, PatternMatch);
        let direct = candidate("insomnia", 0.75, DirectLookup);
        let merged = consolidate(vec![pattern, direct]);
        assert_eq!(merged[0].extraction_method, DirectLookup);
    }

    #[test]
    fn hints_are_unioned() {
        let mut a = candidate("back_pain", 0.85, DirectLookup);
        a.severity_hints = vec!["severe".into()];
        let mut b = candidate("back_pain", 0.7, PatternMatch);
        b.severity_hints = vec!["severe".into()];
        b.quality_hints = vec!["dull".into()];
        let merged = consolidate(vec![b, a]);
        assert_eq!(merged[0].severity_hints, vec!["severe"]);
        assert_eq!(merged[0].quality_hints, vec!["dull"]);
        assert_eq!(merged[0].confidence, 0.85);
    }

    #[test]
    fn output_is_ordered_by_span_then_name() {
        let mut nausea = candidate("nausea", 0.8, DirectLookup);
        nausea.span = (13, 19);
        let mut headache = candidate("headache", 0.8, DirectLookup);
        headache.span = (0, 8);
        let mut fever = candidate("fever", 0.8, PatternMatch);
        fever.span = (13, 19);
        let merged = consolidate(vec![nausea, fever, headache]);
        let names: Vec<_> = merged.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["headache", "fever", "nausea"]);
    }

    #[test]
    fn consolidation_is_idempotent() {
        let mut a = candidate("cough", 0.8, DirectLookup);
        a.temporal_hints = vec!["for 3 days".into()];
        let b = candidate("cough", 0.6, PatternMatch);
        let c = candidate("fever", 0.9, DirectLookup);
        let once = consolidate(vec![a, b, c]);
        let twice = consolidate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(consolidate(Vec::new()).is_empty());
    }
}
