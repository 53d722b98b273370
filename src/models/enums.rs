use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name any variant of a closed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value '{value}' for {field}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(ClinicalCategory {
    Neurological => "neurological",
    Cardiovascular => "cardiovascular",
    Respiratory => "respiratory",
    Gastrointestinal => "gastrointestinal",
    Musculoskeletal => "musculoskeletal",
    Psychiatric => "psychiatric",
    Constitutional => "constitutional",
    Other => "other",
});

str_enum!(ExtractionMethod {
    DirectLookup => "direct_lookup",
    PatternMatch => "pattern_match",
});

str_enum!(TemplateCategory {
    ImplicitComplaint => "implicit_complaint",
    FunctionalLimitation => "functional_limitation",
    BodilySensation => "bodily_sensation",
    RegionalPain => "regional_pain",
});

str_enum!(
    /// Clinical-significance tag carried by every pattern-library entry.
    #[derive(PartialOrd, Ord)]
    Significance {
        Routine => "routine",
        Notable => "notable",
        RedFlag => "red_flag",
    }
);

str_enum!(
    #[derive(PartialOrd, Ord)]
    SeverityTier {
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
        Extreme => "extreme",
    }
);

str_enum!(SeverityBasis {
    Explicit => "explicit",
    Functional => "functional",
    Comparative => "comparative",
    Intensity => "intensity",
    Unspecified => "unspecified",
});

str_enum!(
    #[derive(PartialOrd, Ord)]
    UrgencyTier {
        Routine => "routine",
        Urgent => "urgent",
        Emergency => "emergency",
        Critical => "critical",
    }
);

str_enum!(
    /// Five-level confidence ladder. Variant order follows the score thresholds,
    /// so `Ord` on tiers agrees with `<=` on scores.
    #[derive(PartialOrd, Ord)]
    ConfidenceTier {
        VeryLow => "very_low",
        Low => "low",
        Medium => "medium",
        High => "high",
        VeryHigh => "very_high",
    }
);

str_enum!(OnsetType {
    Acute => "acute",
    Gradual => "gradual",
    Timed => "timed",
    Unspecified => "unspecified",
});

str_enum!(Progression {
    Worsening => "worsening",
    Improving => "improving",
    Stable => "stable",
    Fluctuating => "fluctuating",
});

str_enum!(FrequencyPattern {
    Constant => "constant",
    Intermittent => "intermittent",
    Variable => "variable",
});

str_enum!(Chronicity {
    Acute => "acute",
    Subacute => "subacute",
    Chronic => "chronic",
});

str_enum!(
    #[derive(PartialOrd, Ord)]
    TimeUnit {
        Seconds => "seconds",
        Minutes => "minutes",
        Hours => "hours",
        Days => "days",
        Nights => "nights",
        Weeks => "weeks",
        Months => "months",
        Years => "years",
    }
);

str_enum!(ParseOutcome {
    Complete => "complete",
    NoSymptoms => "no_symptoms",
    InputTooShort => "input_too_short",
    Fault => "fault",
});

str_enum!(UncertaintyFlag {
    NoSymptomsDetected => "no_symptoms_detected",
    LowSymptomConfidence => "low_symptom_confidence",
    NoTemporalInformation => "no_temporal_information",
    SeverityUnspecified => "severity_unspecified",
    PatternOnlyExtraction => "pattern_only_extraction",
    NormalizationDegraded => "normalization_degraded",
    InputTruncated => "input_truncated",
});

impl ConfidenceTier {
    /// Map a score onto the fixed ladder: <0.3, <0.5, <0.7, <0.9, else very high.
    pub fn from_score(score: f32) -> Self {
        use crate::pipeline::confidence::thresholds;

        if score < thresholds::VERY_LOW {
            Self::VeryLow
        } else if score < thresholds::LOW {
            Self::Low
        } else if score < thresholds::MEDIUM {
            Self::Medium
        } else if score < thresholds::HIGH {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}

impl SeverityTier {
    /// Nominal 0-10 score for a tier when no numeric rating was given.
    pub fn nominal_score(&self) -> f32 {
        match self {
            Self::Mild => 2.5,
            Self::Moderate => 5.0,
            Self::Severe => 7.5,
            Self::Extreme => 9.0,
        }
    }

    /// Tier for a patient's 0-10 rating.
    pub fn from_rating(rating: u32) -> Self {
        match rating {
            0..=3 => Self::Mild,
            4..=6 => Self::Moderate,
            7..=8 => Self::Severe,
            _ => Self::Extreme,
        }
    }

    pub fn is_severe_or_worse(&self) -> bool {
        *self >= Self::Severe
    }
}

impl TimeUnit {
    /// Parse a singular or plural unit word ("day", "weeks").
    pub fn from_word(word: &str) -> Option<Self> {
        let singular = word.trim().to_lowercase();
        let singular = singular.strip_suffix('s').unwrap_or(&singular);
        match singular {
            "second" | "sec" => Some(Self::Seconds),
            "minute" | "min" => Some(Self::Minutes),
            "hour" | "hr" => Some(Self::Hours),
            "day" => Some(Self::Days),
            "night" => Some(Self::Nights),
            "week" | "wk" => Some(Self::Weeks),
            "month" => Some(Self::Months),
            "year" | "yr" => Some(Self::Years),
            _ => None,
        }
    }

    /// Chronicity implied by a duration expressed in this unit.
    pub fn implied_chronicity(&self) -> Chronicity {
        match self {
            Self::Seconds | Self::Minutes | Self::Hours => Chronicity::Acute,
            Self::Days | Self::Nights => Chronicity::Subacute,
            Self::Weeks | Self::Months | Self::Years => Chronicity::Chronic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn clinical_category_round_trip() {
        for (variant, s) in [
            (ClinicalCategory::Neurological, "neurological"),
            (ClinicalCategory::Cardiovascular, "cardiovascular"),
            (ClinicalCategory::Respiratory, "respiratory"),
            (ClinicalCategory::Gastrointestinal, "gastrointestinal"),
            (ClinicalCategory::Musculoskeletal, "musculoskeletal"),
            (ClinicalCategory::Psychiatric, "psychiatric"),
            (ClinicalCategory::Constitutional, "constitutional"),
            (ClinicalCategory::Other, "other"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ClinicalCategory::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ConfidenceTier::VeryLow).unwrap();
        assert_eq!(json, "\"very_low\"");
        let json = serde_json::to_string(&ParseOutcome::InputTooShort).unwrap();
        assert_eq!(json, "\"input_too_short\"");
    }

    #[test]
    fn confidence_tier_thresholds() {
        assert_eq!(ConfidenceTier::from_score(0.0), ConfidenceTier::VeryLow);
        assert_eq!(ConfidenceTier::from_score(0.29), ConfidenceTier::VeryLow);
        assert_eq!(ConfidenceTier::from_score(0.3), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.5), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.7), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.9), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(1.0), ConfidenceTier::VeryHigh);
    }

    #[test]
    fn confidence_tier_is_monotonic() {
        let mut previous = ConfidenceTier::from_score(0.0);
        for step in 0..=1000 {
            let tier = ConfidenceTier::from_score(step as f32 / 1000.0);
            assert!(previous <= tier, "tier regressed at {step}");
            previous = tier;
        }
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(SeverityTier::Mild < SeverityTier::Extreme);
        assert!(UrgencyTier::Routine < UrgencyTier::Emergency);
        assert!(UrgencyTier::Emergency < UrgencyTier::Critical);
        assert!(SeverityTier::Severe.is_severe_or_worse());
        assert!(!SeverityTier::Moderate.is_severe_or_worse());
    }

    #[test]
    fn rating_maps_to_tier() {
        assert_eq!(SeverityTier::from_rating(2), SeverityTier::Mild);
        assert_eq!(SeverityTier::from_rating(5), SeverityTier::Moderate);
        assert_eq!(SeverityTier::from_rating(8), SeverityTier::Severe);
        assert_eq!(SeverityTier::from_rating(10), SeverityTier::Extreme);
    }

    #[test]
    fn time_unit_from_word_and_chronicity() {
        assert_eq!(TimeUnit::from_word("Hours"), Some(TimeUnit::Hours));
        assert_eq!(TimeUnit::from_word("night"), Some(TimeUnit::Nights));
        assert_eq!(TimeUnit::from_word("fortnight"), None);
        assert_eq!(TimeUnit::Minutes.implied_chronicity(), Chronicity::Acute);
        assert_eq!(TimeUnit::Days.implied_chronicity(), Chronicity::Subacute);
        assert_eq!(TimeUnit::Years.implied_chronicity(), Chronicity::Chronic);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(ClinicalCategory::from_str("dermatological").is_err());
        assert!(UrgencyTier::from_str("").is_err());
        let err = SeverityTier::from_str("huge").unwrap_err();
        assert_eq!(err.field, "SeverityTier");
    }
}
