//! Implicit-complaint templates for the fallback extraction pass.
//!
//! These catch statements that describe a symptom without naming it
//! ("can't fall asleep", "my back is killing me").

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::TemplateCategory;

/// What a template resolves to.
pub enum ComplaintTarget {
    /// A fixed canonical symptom.
    Symptom(&'static str),
    /// Capture group 1 names a body part, resolved through [`regional_symptom`].
    RegionalPain,
}

pub struct ComplaintTemplate {
    pub id: &'static str,
    pub pattern: Cow<'static, str>,
    pub target: ComplaintTarget,
    pub category: TemplateCategory,
    pub weight: f32,
}

pub struct CompiledTemplate {
    pub template: &'static ComplaintTemplate,
    pub regex: Regex,
}

const PAIN_VERBS: &str =
    r"(?:killing\s+me|hurts?|hurting|aches?|aching|throbbing|sore|pounding)";

const PAIN_REGIONS: &str =
    r"(head|chest|back|stomach|belly|tummy|abdomen|neck|throat|arms?|legs?|knees?|joints?|muscles)";

pub static COMPLAINT_TEMPLATES: LazyLock<Vec<ComplaintTemplate>> = LazyLock::new(|| {
    vec![
        ComplaintTemplate {
            id: "sleep_onset",
            pattern: Cow::Borrowed(
                r"(?i)\bcan(?:'t|not|\s+not)\s+(?:fall|stay|get\s+to)\s+(?:a)?sleep\b",
            ),
            target: ComplaintTarget::Symptom("insomnia"),
            category: TemplateCategory::ImplicitComplaint,
            weight: 0.75,
        },
        ComplaintTemplate {
            id: "night_waking",
            pattern: Cow::Borrowed(r"(?i)\b(?:keep|kept)\s+waking\s+up\b"),
            target: ComplaintTarget::Symptom("insomnia"),
            category: TemplateCategory::ImplicitComplaint,
            weight: 0.65,
        },
        ComplaintTemplate {
            id: "spinning",
            pattern: Cow::Borrowed(
                r"(?i)\b(?:everything|the\s+room|the\s+world)\s+(?:is\s+|keeps\s+)?spinning\b",
            ),
            target: ComplaintTarget::Symptom("dizziness"),
            category: TemplateCategory::BodilySensation,
            weight: 0.75,
        },
        ComplaintTemplate {
            id: "breath_catch",
            pattern: Cow::Borrowed(r"(?i)\bcan(?:'t|not)\s+(?:catch|get)\s+my\s+breath\b"),
            target: ComplaintTarget::Symptom("dyspnea"),
            category: TemplateCategory::BodilySensation,
            weight: 0.8,
        },
        ComplaintTemplate {
            id: "about_to_vomit",
            pattern: Cow::Borrowed(
                r"(?i)\b(?:going\s+to|gonna|about\s+to)\s+(?:throw\s+up|be\s+sick|vomit)\b",
            ),
            target: ComplaintTarget::Symptom("nausea"),
            category: TemplateCategory::BodilySensation,
            weight: 0.7,
        },
        ComplaintTemplate {
            id: "keep_down",
            pattern: Cow::Borrowed(
                r"(?i)\bcan(?:'t|not)\s+keep\s+(?:anything|food|water|it)\s+down\b",
            ),
            target: ComplaintTarget::Symptom("vomiting"),
            category: TemplateCategory::FunctionalLimitation,
            weight: 0.75,
        },
        ComplaintTemplate {
            id: "swallow_pain",
            pattern: Cow::Borrowed(r"(?i)\bhurts?\s+(?:to|when\s+i)\s+swallow\b"),
            target: ComplaintTarget::Symptom("sore_throat"),
            category: TemplateCategory::BodilySensation,
            weight: 0.75,
        },
        ComplaintTemplate {
            id: "breath_pain",
            pattern: Cow::Borrowed(
                r"(?i)\bhurts?\s+(?:to|when\s+i)\s+(?:breathe|take\s+a\s+deep\s+breath)\b",
            ),
            target: ComplaintTarget::Symptom("chest_pain"),
            category: TemplateCategory::BodilySensation,
            weight: 0.7,
        },
        ComplaintTemplate {
            id: "heart_flutter",
            pattern: Cow::Borrowed(
                r"(?i)\bheart\s+(?:is\s+|keeps\s+)?(?:fluttering|skipping|jumping|thumping)\b",
            ),
            target: ComplaintTarget::Symptom("palpitations"),
            category: TemplateCategory::BodilySensation,
            weight: 0.75,
        },
        ComplaintTemplate {
            id: "out_of_bed",
            pattern: Cow::Borrowed(
                r"(?i)\b(?:barely|can(?:'t|not))\s+(?:get\s+out\s+of|drag\s+myself\s+out\s+of)\s+bed\b",
            ),
            target: ComplaintTarget::Symptom("fatigue"),
            category: TemplateCategory::FunctionalLimitation,
            weight: 0.7,
        },
        ComplaintTemplate {
            id: "urination_burn",
            pattern: Cow::Borrowed(
                r"(?i)\b(?:it\s+)?(?:burns|stings)\s+when\s+i\s+(?:pee|urinate)\b",
            ),
            target: ComplaintTarget::Symptom("dysuria"),
            category: TemplateCategory::BodilySensation,
            weight: 0.75,
        },
        ComplaintTemplate {
            id: "cant_eat",
            pattern: Cow::Borrowed(r"(?i)\bcan(?:'t|not)\s+(?:eat|face\s+food)\b"),
            target: ComplaintTarget::Symptom("loss_of_appetite"),
            category: TemplateCategory::FunctionalLimitation,
            weight: 0.65,
        },
        ComplaintTemplate {
            id: "body_part_hurts",
            pattern: Cow::Owned(format!(
                r"(?i)\bmy\s+{PAIN_REGIONS}\s+(?:is\s+|are\s+|has\s+been\s+|have\s+been\s+)?{PAIN_VERBS}\b"
            )),
            target: ComplaintTarget::RegionalPain,
            category: TemplateCategory::RegionalPain,
            weight: 0.75,
        },
        ComplaintTemplate {
            id: "pain_in_body_part",
            pattern: Cow::Owned(format!(
                r"(?i)\b(?:pain|ache|aching|soreness)\s+in\s+(?:my|the)\s+{PAIN_REGIONS}\b"
            )),
            target: ComplaintTarget::RegionalPain,
            category: TemplateCategory::RegionalPain,
            weight: 0.75,
        },
    ]
});

pub static COMPILED_TEMPLATES: LazyLock<Vec<CompiledTemplate>> = LazyLock::new(|| {
    COMPLAINT_TEMPLATES
        .iter()
        .map(|template| CompiledTemplate {
            template,
            regex: Regex::new(&template.pattern).expect("Invalid complaint template regex"),
        })
        .collect()
});

/// Symptom implied by pain in a named body part.
pub fn regional_symptom(body_part: &str) -> Option<&'static str> {
    let part = body_part.to_lowercase();
    let part = part.trim_end_matches('s');
    match part {
        "head" => Some("headache"),
        "chest" => Some("chest_pain"),
        "back" => Some("back_pain"),
        "stomach" | "belly" | "tummy" | "abdomen" => Some("abdominal_pain"),
        "neck" => Some("neck_pain"),
        "throat" => Some("sore_throat"),
        "arm" => Some("arm_pain"),
        "knee" | "joint" => Some("joint_pain"),
        "leg" | "muscle" => Some("muscle_pain"),
        _ => None,
    }
}
