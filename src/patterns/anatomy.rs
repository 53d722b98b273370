//! Body-region table: canonical region → clinical category + surface synonyms.
//!
//! Some regions carry no synonyms; they are reachable only as the typical
//! region of a symptom (e.g. `general` for constitutional complaints).

use std::sync::LazyLock;

use crate::models::ClinicalCategory;

use super::PhraseSet;

pub struct BodyRegion {
    pub name: &'static str,
    pub category: ClinicalCategory,
    pub synonyms: &'static [&'static str],
}

pub static REGION_TABLE: &[BodyRegion] = &[
    BodyRegion {
        name: "head",
        category: ClinicalCategory::Neurological,
        synonyms: &["head", "skull", "temple", "temples", "forehead"],
    },
    BodyRegion {
        name: "eyes",
        category: ClinicalCategory::Neurological,
        synonyms: &["eye", "eyes", "vision"],
    },
    BodyRegion {
        name: "jaw",
        category: ClinicalCategory::Musculoskeletal,
        synonyms: &["jaw", "teeth"],
    },
    BodyRegion {
        name: "neck",
        category: ClinicalCategory::Musculoskeletal,
        synonyms: &["neck"],
    },
    BodyRegion {
        name: "throat",
        category: ClinicalCategory::Respiratory,
        synonyms: &["throat", "tonsils"],
    },
    BodyRegion {
        name: "nose",
        category: ClinicalCategory::Respiratory,
        synonyms: &["nose", "sinuses", "sinus"],
    },
    BodyRegion {
        name: "chest",
        category: ClinicalCategory::Cardiovascular,
        synonyms: &["chest", "breastbone", "sternum", "heart"],
    },
    BodyRegion {
        name: "lungs",
        category: ClinicalCategory::Respiratory,
        synonyms: &["lungs", "lung"],
    },
    BodyRegion {
        name: "abdomen",
        category: ClinicalCategory::Gastrointestinal,
        synonyms: &["stomach", "belly", "abdomen", "tummy", "gut"],
    },
    BodyRegion {
        name: "back",
        category: ClinicalCategory::Musculoskeletal,
        synonyms: &["lower back", "upper back", "back", "spine"],
    },
    BodyRegion {
        name: "arm",
        category: ClinicalCategory::Musculoskeletal,
        synonyms: &["arm", "arms", "shoulder", "shoulders", "elbow", "wrist", "hand", "hands"],
    },
    BodyRegion {
        name: "leg",
        category: ClinicalCategory::Musculoskeletal,
        synonyms: &[
            "leg", "legs", "ankle", "ankles", "foot", "feet", "calf", "calves", "thigh",
        ],
    },
    BodyRegion {
        name: "joints",
        category: ClinicalCategory::Musculoskeletal,
        synonyms: &["joint", "joints", "knee", "knees", "hip", "hips"],
    },
    BodyRegion {
        name: "pelvis",
        category: ClinicalCategory::Other,
        synonyms: &["pelvis", "groin", "bladder"],
    },
    BodyRegion {
        name: "skin",
        category: ClinicalCategory::Other,
        synonyms: &["skin"],
    },
    BodyRegion {
        name: "general",
        category: ClinicalCategory::Constitutional,
        synonyms: &[],
    },
];

static REGION_MATCHERS: LazyLock<Vec<(&'static BodyRegion, PhraseSet)>> = LazyLock::new(|| {
    REGION_TABLE
        .iter()
        .filter(|r| !r.synonyms.is_empty())
        .map(|r| (r, PhraseSet::new(r.synonyms)))
        .collect()
});

pub fn region(name: &str) -> Option<&'static BodyRegion> {
    REGION_TABLE.iter().find(|r| r.name == name)
}

/// Canonical regions named in `text`, ordered by first mention.
pub fn regions_mentioned(text: &str) -> Vec<&'static str> {
    let mut found: Vec<(usize, &'static str)> = REGION_MATCHERS
        .iter()
        .filter_map(|(region, set)| set.earliest(text).map(|(_, m)| (m.start(), region.name)))
        .collect();
    found.sort_by_key(|(start, name)| (*start, *name));
    found.into_iter().map(|(_, name)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_are_ordered_by_position() {
        let regions = regions_mentioned("pain from my chest down to my left arm");
        assert_eq!(regions, vec!["chest", "arm"]);
    }

    #[test]
    fn synonyms_map_to_canonical_region() {
        assert_eq!(regions_mentioned("my tummy hurts"), vec!["abdomen"]);
        assert_eq!(regions_mentioned("both knees ache"), vec!["joints"]);
    }

    #[test]
    fn no_mentions_in_plain_text() {
        assert!(regions_mentioned("I feel awful").is_empty());
    }

    #[test]
    fn region_lookup() {
        assert_eq!(region("chest").unwrap().category, ClinicalCategory::Cardiovascular);
        assert!(region("general").unwrap().synonyms.is_empty());
        assert!(region("tail").is_none());
    }
}
