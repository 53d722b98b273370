//! Curated symptom-synonym table for the direct extraction pass.
//!
//! Each entry maps a canonical symptom to its surface phrases (tried in
//! order), a base confidence weight, a clinical-significance tag, a typical
//! body region and optional exclusion phrases that veto an overlapping match.

use std::sync::LazyLock;

use regex::Regex;

use super::phrase_regex;
use crate::models::{ClinicalCategory, Significance};

pub struct SymptomEntry {
    pub name: &'static str,
    pub medical_term: &'static str,
    pub category: ClinicalCategory,
    pub base_confidence: f32,
    pub significance: Significance,
    pub typical_region: Option<&'static str>,
    pub phrases: &'static [&'static str],
    pub exclusions: &'static [&'static str],
}

/// A table entry with its phrases compiled.
pub struct CompiledSymptom {
    pub entry: &'static SymptomEntry,
    pub phrases: Vec<(&'static str, Regex)>,
    pub exclusions: Vec<Regex>,
}

macro_rules! entry {
    (
        $name:literal, $term:literal, $category:ident, $base:literal, $significance:ident,
        $region:expr, $phrases:expr, $exclusions:expr $(,)?
    ) => {
        SymptomEntry {
            name: $name,
            medical_term: $term,
            category: ClinicalCategory::$category,
            base_confidence: $base,
            significance: Significance::$significance,
            typical_region: $region,
            phrases: $phrases,
            exclusions: $exclusions,
        }
    };
}

pub static SYMPTOM_TABLE: &[SymptomEntry] = &[
    // ── Cardiovascular ──────────────────────────────────────
    entry!(
        "chest_pain", "thoracic pain", Cardiovascular, 0.85, RedFlag, Some("chest"),
        &[
            "chest pain", "pain in my chest", "pain in the chest", "chest hurts",
            "chest pressure", "pressure in my chest", "chest tightness", "tight chest",
            "tightness in my chest", "chest discomfort",
        ],
        &[],
    ),
    entry!(
        "palpitations", "palpitations", Cardiovascular, 0.8, Notable, Some("chest"),
        &[
            "palpitations", "heart racing", "racing heart", "heart is racing",
            "heart pounding", "heart is pounding", "fluttering in my chest",
            "irregular heartbeat", "skipped beats", "skipping beats",
        ],
        &[],
    ),
    entry!(
        "syncope", "syncope", Cardiovascular, 0.85, RedFlag, Some("general"),
        &[
            "passed out", "fainted", "fainting", "blacked out", "loss of consciousness",
            "lost consciousness",
        ],
        &[],
    ),
    entry!(
        "leg_swelling", "peripheral edema", Cardiovascular, 0.8, Notable, Some("leg"),
        &[
            "swollen legs", "leg swelling", "swelling in my legs", "swollen ankles",
            "ankle swelling", "swollen feet", "puffy ankles",
        ],
        &[],
    ),
    entry!(
        "diaphoresis", "diaphoresis", Cardiovascular, 0.75, Notable, Some("general"),
        &["cold sweat", "cold sweats", "sweating", "sweaty", "clammy"],
        &[],
    ),
    // ── Respiratory ─────────────────────────────────────────
    entry!(
        "dyspnea", "dyspnea", Respiratory, 0.85, RedFlag, Some("lungs"),
        &[
            "shortness of breath", "short of breath", "difficulty breathing",
            "trouble breathing", "hard to breathe", "can't breathe", "cannot breathe",
            "out of breath", "breathless", "winded",
        ],
        &[],
    ),
    entry!(
        "cough", "tussis", Respiratory, 0.85, Routine, Some("lungs"),
        &["coughing up", "dry cough", "wet cough", "cough", "coughing"],
        &["cough drop", "cough drops", "cough syrup"],
    ),
    entry!(
        "wheezing", "wheezing", Respiratory, 0.8, Notable, Some("lungs"),
        &["wheezing", "wheeze", "whistling when i breathe"],
        &[],
    ),
    entry!(
        "sore_throat", "pharyngitis", Respiratory, 0.85, Routine, Some("throat"),
        &[
            "sore throat", "throat hurts", "scratchy throat", "painful swallowing",
            "throat is sore",
        ],
        &[],
    ),
    entry!(
        "nasal_congestion", "nasal congestion", Respiratory, 0.75, Routine, Some("nose"),
        &[
            "stuffy nose", "blocked nose", "runny nose", "nasal congestion",
            "congested", "congestion",
        ],
        &["traffic congestion"],
    ),
    // ── Neurological ────────────────────────────────────────
    entry!(
        "headache", "cephalalgia", Neurological, 0.85, Notable, Some("head"),
        &[
            "headache", "head ache", "head hurts", "head is pounding", "pounding head",
            "head pain", "migraine", "splitting head",
        ],
        &[],
    ),
    entry!(
        "dizziness", "vertigo", Neurological, 0.8, Notable, Some("head"),
        &[
            "dizziness", "dizzy", "lightheaded", "light-headed", "light headed",
            "vertigo", "room spinning", "woozy",
        ],
        &[],
    ),
    entry!(
        "weakness", "asthenia", Neurological, 0.7, Notable, Some("general"),
        &["weakness", "feeling weak", "feel weak", "weak", "no strength"],
        &["weak tea", "weak coffee", "weak spot", "weak signal"],
    ),
    entry!(
        "numbness", "paresthesia", Neurological, 0.8, Notable, None,
        &["numbness", "numb", "tingling", "pins and needles"],
        &[],
    ),
    entry!(
        "confusion", "altered mental status", Neurological, 0.8, RedFlag, Some("head"),
        &["confusion", "confused", "disoriented", "can't think straight"],
        &["confused about", "confused by"],
    ),
    entry!(
        "speech_difficulty", "dysarthria", Neurological, 0.85, RedFlag, Some("head"),
        &[
            "slurred speech", "slurring my words", "trouble speaking",
            "difficulty speaking", "can't speak", "words come out wrong",
        ],
        &[],
    ),
    entry!(
        "photophobia", "photophobia", Neurological, 0.8, Routine, Some("eyes"),
        &[
            "sensitive to light", "sensitivity to light", "light sensitivity",
            "light hurts my eyes", "photophobia", "bright lights hurt",
        ],
        &[],
    ),
    entry!(
        "aura", "migraine aura", Neurological, 0.75, Routine, Some("eyes"),
        &["aura", "seeing spots", "flashing lights", "zigzag lines"],
        &[],
    ),
    entry!(
        "blurred_vision", "blurred vision", Neurological, 0.8, Notable, Some("eyes"),
        &[
            "blurred vision", "blurry vision", "vision is blurry", "double vision",
            "trouble seeing",
        ],
        &[],
    ),
    // ── Gastrointestinal ────────────────────────────────────
    entry!(
        "nausea", "nausea", Gastrointestinal, 0.85, Routine, Some("abdomen"),
        &[
            "nausea", "nauseous", "nauseated", "sick to my stomach", "queasy",
            "feel like throwing up",
        ],
        &[],
    ),
    entry!(
        "vomiting", "emesis", Gastrointestinal, 0.85, Notable, Some("abdomen"),
        &["vomiting", "throwing up", "threw up", "vomited", "puking", "being sick"],
        &["like throwing up"],
    ),
    entry!(
        "abdominal_pain", "abdominal pain", Gastrointestinal, 0.85, Notable, Some("abdomen"),
        &[
            "abdominal pain", "stomach pain", "stomach ache", "stomachache",
            "belly pain", "tummy ache", "pain in my stomach", "stomach hurts",
            "stomach cramps", "cramps",
        ],
        &["leg cramps", "muscle cramps", "menstrual cramps"],
    ),
    entry!(
        "diarrhea", "diarrhea", Gastrointestinal, 0.85, Routine, Some("abdomen"),
        &["diarrhea", "diarrhoea", "loose stools", "watery stools", "runny stools"],
        &[],
    ),
    entry!(
        "constipation", "constipation", Gastrointestinal, 0.8, Routine, Some("abdomen"),
        &["constipation", "constipated", "can't go to the bathroom"],
        &[],
    ),
    entry!(
        "heartburn", "pyrosis", Gastrointestinal, 0.8, Routine, Some("chest"),
        &["heartburn", "acid reflux", "reflux", "indigestion"],
        &[],
    ),
    // ── Musculoskeletal ─────────────────────────────────────
    entry!(
        "back_pain", "dorsalgia", Musculoskeletal, 0.85, Routine, Some("back"),
        &[
            "back pain", "backache", "back hurts", "lower back pain",
            "pain in my back", "sore back",
        ],
        &[],
    ),
    entry!(
        "neck_pain", "cervicalgia", Musculoskeletal, 0.8, Routine, Some("neck"),
        &["neck pain", "neck hurts", "sore neck", "pain in my neck"],
        &[],
    ),
    entry!(
        "neck_stiffness", "nuchal rigidity", Musculoskeletal, 0.8, RedFlag, Some("neck"),
        &["stiff neck", "neck stiffness", "neck is stiff", "can't bend my neck"],
        &[],
    ),
    entry!(
        "joint_pain", "arthralgia", Musculoskeletal, 0.8, Routine, Some("joints"),
        &[
            "joint pain", "joints hurt", "aching joints", "sore joints", "knee pain",
            "painful joints",
        ],
        &[],
    ),
    entry!(
        "muscle_pain", "myalgia", Musculoskeletal, 0.8, Routine, Some("general"),
        &[
            "muscle pain", "muscle aches", "aching muscles", "body aches",
            "sore muscles", "achy",
        ],
        &[],
    ),
    entry!(
        "arm_pain", "brachialgia", Musculoskeletal, 0.75, Notable, Some("arm"),
        &[
            "arm pain", "pain in my arm", "arm hurts", "radiating to my arm",
            "radiates to my arm", "radiating down my arm", "radiating to the arm",
            "shooting down my arm",
        ],
        &[],
    ),
    // ── Psychiatric ─────────────────────────────────────────
    entry!(
        "insomnia", "insomnia", Psychiatric, 0.8, Routine, None,
        &[
            "insomnia", "can't sleep", "cannot sleep", "trouble sleeping",
            "difficulty sleeping", "unable to sleep", "sleepless",
        ],
        &[],
    ),
    entry!(
        "anxiety", "anxiety", Psychiatric, 0.75, Routine, None,
        &["anxiety", "anxious", "panic attack", "panicky", "nervous", "on edge"],
        &["don't panic"],
    ),
    entry!(
        "depressed_mood", "depressed mood", Psychiatric, 0.75, Notable, None,
        &[
            "depressed", "depression", "feeling down", "hopeless", "low mood",
            "sad all the time",
        ],
        &[],
    ),
    entry!(
        "concentration_difficulty", "impaired concentration", Psychiatric, 0.7, Routine, None,
        &[
            "can't concentrate", "trouble concentrating", "difficulty concentrating",
            "brain fog", "can't focus",
        ],
        &[],
    ),
    // ── Constitutional ──────────────────────────────────────
    entry!(
        "fever", "pyrexia", Constitutional, 0.85, Notable, Some("general"),
        &[
            "fever", "feverish", "high temperature", "running a temperature",
            "febrile", "temperature of",
        ],
        &["hay fever", "cabin fever", "fever dream"],
    ),
    entry!(
        "chills", "rigors", Constitutional, 0.8, Routine, Some("general"),
        &["chills", "shivering", "shaking chills", "the shivers"],
        &[],
    ),
    entry!(
        "fatigue", "fatigue", Constitutional, 0.75, Routine, Some("general"),
        &[
            "fatigue", "fatigued", "exhausted", "exhaustion", "no energy", "worn out",
            "lethargic", "drained", "tired",
        ],
        &["tired of", "sick and tired"],
    ),
    entry!(
        "loss_of_appetite", "anorexia", Constitutional, 0.75, Routine, Some("general"),
        &["loss of appetite", "no appetite", "lost my appetite", "not hungry"],
        &[],
    ),
    entry!(
        "weight_loss", "weight loss", Constitutional, 0.75, Notable, Some("general"),
        &["weight loss", "losing weight", "lost weight"],
        &["trying to lose weight"],
    ),
    entry!(
        "excessive_thirst", "polydipsia", Constitutional, 0.75, Routine, Some("general"),
        &["always thirsty", "very thirsty", "excessive thirst", "constantly thirsty"],
        &[],
    ),
    // ── Other ───────────────────────────────────────────────
    entry!(
        "rash", "exanthem", Other, 0.8, Routine, Some("skin"),
        &["rash", "hives", "itchy skin", "skin irritation", "red spots"],
        &[],
    ),
    entry!(
        "dysuria", "dysuria", Other, 0.8, Routine, Some("pelvis"),
        &[
            "burning when i pee", "painful urination", "burning urination",
            "hurts to pee", "burns when i pee",
        ],
        &[],
    ),
    entry!(
        "frequent_urination", "polyuria", Other, 0.75, Routine, Some("pelvis"),
        &[
            "frequent urination", "peeing a lot", "urinating frequently",
            "always need to pee", "peeing all the time",
        ],
        &[],
    ),
];

pub static COMPILED_SYMPTOMS: LazyLock<Vec<CompiledSymptom>> = LazyLock::new(|| {
    SYMPTOM_TABLE
        .iter()
        .map(|entry| CompiledSymptom {
            entry,
            phrases: entry.phrases.iter().map(|p| (*p, phrase_regex(p))).collect(),
            exclusions: entry.exclusions.iter().map(|p| phrase_regex(p)).collect(),
        })
        .collect()
});

/// Look up a table entry by canonical name.
pub fn symptom_entry(name: &str) -> Option<&'static SymptomEntry> {
    SYMPTOM_TABLE.iter().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_names_are_unique() {
        let mut seen = HashSet::new();
        for entry in SYMPTOM_TABLE {
            assert!(seen.insert(entry.name), "duplicate entry {}", entry.name);
        }
    }

    #[test]
    fn base_confidences_are_in_range() {
        for entry in SYMPTOM_TABLE {
            assert!(
                (0.6..=0.95).contains(&entry.base_confidence),
                "{} has base {}",
                entry.name,
                entry.base_confidence
            );
            assert!(!entry.phrases.is_empty(), "{} has no phrases", entry.name);
        }
    }

    #[test]
    fn phrases_are_lowercase() {
        for entry in SYMPTOM_TABLE {
            for phrase in entry.phrases.iter().chain(entry.exclusions) {
                assert_eq!(*phrase, phrase.to_lowercase(), "{phrase} in {}", entry.name);
            }
        }
    }

    #[test]
    fn typical_regions_exist_in_region_table() {
        for entry in SYMPTOM_TABLE {
            if let Some(region) = entry.typical_region {
                assert!(
                    crate::patterns::anatomy::region(region).is_some(),
                    "{} points at unknown region {region}",
                    entry.name
                );
            }
        }
    }

    #[test]
    fn compiled_table_matches_source() {
        assert_eq!(COMPILED_SYMPTOMS.len(), SYMPTOM_TABLE.len());
        let chest = symptom_entry("chest_pain").unwrap();
        assert_eq!(chest.category, ClinicalCategory::Cardiovascular);
        assert!(symptom_entry("hiccups").is_none());
    }
}
