//! Syndrome templates, red-flag symptom pairs and emergency guidance.

/// A named clinical pattern. Activates when any required symptom is present;
/// supporting symptoms raise its confidence.
pub struct SyndromeTemplate {
    pub name: &'static str,
    pub required: &'static [&'static str],
    pub supporting: &'static [&'static str],
    pub base_confidence: f32,
    pub reasoning: &'static str,
}

pub static SYNDROME_TEMPLATES: &[SyndromeTemplate] = &[
    SyndromeTemplate {
        name: "acute_coronary_syndrome",
        required: &["chest_pain"],
        supporting: &["dyspnea", "diaphoresis", "nausea", "arm_pain"],
        base_confidence: 0.65,
        reasoning: "Chest pain with cardiac features suggests possible myocardial ischemia",
    },
    SyndromeTemplate {
        name: "migraine_syndrome",
        required: &["headache"],
        supporting: &["nausea", "photophobia", "aura", "vomiting"],
        base_confidence: 0.45,
        reasoning: "Headache with associated migraine features",
    },
    SyndromeTemplate {
        name: "meningitis_pattern",
        required: &["neck_stiffness"],
        supporting: &["fever", "headache", "photophobia", "confusion", "vomiting"],
        base_confidence: 0.55,
        reasoning: "Neck stiffness with signs of meningeal irritation",
    },
    SyndromeTemplate {
        name: "stroke_pattern",
        required: &["speech_difficulty", "numbness"],
        supporting: &["weakness", "confusion", "dizziness", "blurred_vision", "headache"],
        base_confidence: 0.55,
        reasoning: "Focal neurological deficit suggests possible cerebrovascular event",
    },
    SyndromeTemplate {
        name: "viral_respiratory_infection",
        required: &["cough", "sore_throat", "nasal_congestion"],
        supporting: &["fever", "fatigue", "muscle_pain", "headache", "chills"],
        base_confidence: 0.45,
        reasoning: "Upper respiratory symptoms consistent with a viral infection",
    },
    SyndromeTemplate {
        name: "influenza_like_illness",
        required: &["fever"],
        supporting: &["muscle_pain", "fatigue", "chills", "cough", "headache", "sore_throat"],
        base_confidence: 0.45,
        reasoning: "Fever with systemic symptoms consistent with influenza-like illness",
    },
    SyndromeTemplate {
        name: "lower_respiratory_infection",
        required: &["cough"],
        supporting: &["fever", "dyspnea", "chest_pain", "fatigue", "chills"],
        base_confidence: 0.4,
        reasoning: "Cough with systemic or breathing symptoms suggests lower airway involvement",
    },
    SyndromeTemplate {
        name: "gastroenteritis",
        required: &["vomiting", "diarrhea"],
        supporting: &["nausea", "abdominal_pain", "fever", "fatigue"],
        base_confidence: 0.5,
        reasoning: "Gastrointestinal losses consistent with gastroenteritis",
    },
    SyndromeTemplate {
        name: "gerd_pattern",
        required: &["heartburn"],
        supporting: &["chest_pain", "nausea", "cough", "sore_throat"],
        base_confidence: 0.5,
        reasoning: "Burning epigastric discomfort consistent with acid reflux",
    },
    SyndromeTemplate {
        name: "urinary_tract_infection",
        required: &["dysuria", "frequent_urination"],
        supporting: &["fever", "abdominal_pain", "back_pain"],
        base_confidence: 0.5,
        reasoning: "Urinary symptoms consistent with urinary tract infection",
    },
    SyndromeTemplate {
        name: "heart_failure_pattern",
        required: &["leg_swelling"],
        supporting: &["dyspnea", "fatigue", "palpitations"],
        base_confidence: 0.45,
        reasoning: "Peripheral swelling with exertional symptoms suggests fluid overload",
    },
    SyndromeTemplate {
        name: "hyperglycemia_pattern",
        required: &["excessive_thirst", "frequent_urination"],
        supporting: &["fatigue", "weight_loss", "blurred_vision"],
        base_confidence: 0.45,
        reasoning: "Thirst and polyuria suggest possible hyperglycemia",
    },
    SyndromeTemplate {
        name: "anxiety_pattern",
        required: &["anxiety"],
        supporting: &["palpitations", "insomnia", "dyspnea", "dizziness", "diaphoresis"],
        base_confidence: 0.45,
        reasoning: "Anxiety with autonomic symptoms",
    },
    SyndromeTemplate {
        name: "depressive_pattern",
        required: &["depressed_mood"],
        supporting: &["insomnia", "fatigue", "loss_of_appetite", "concentration_difficulty"],
        base_confidence: 0.45,
        reasoning: "Low mood with neurovegetative symptoms",
    },
];

/// Symptom pairs that are dangerous together regardless of severity.
pub struct RedFlagPair {
    pub first: &'static str,
    pub second: &'static str,
    pub description: &'static str,
}

pub static RED_FLAG_PAIRS: &[RedFlagPair] = &[
    RedFlagPair {
        first: "chest_pain",
        second: "dyspnea",
        description: "Chest pain with shortness of breath: possible cardiac or pulmonary emergency",
    },
    RedFlagPair {
        first: "chest_pain",
        second: "diaphoresis",
        description: "Chest pain with sweating: possible acute coronary syndrome",
    },
    RedFlagPair {
        first: "headache",
        second: "neck_stiffness",
        description: "Headache with neck stiffness: possible meningitis or subarachnoid hemorrhage",
    },
    RedFlagPair {
        first: "headache",
        second: "confusion",
        description: "Headache with confusion: possible intracranial pathology",
    },
    RedFlagPair {
        first: "weakness",
        second: "speech_difficulty",
        description: "Weakness with speech difficulty: possible stroke",
    },
    RedFlagPair {
        first: "fever",
        second: "confusion",
        description: "Fever with confusion: possible sepsis or central nervous system infection",
    },
];

/// Always emergency indicators.
pub const EMERGENCY_SYMPTOMS: &[&str] = &["chest_pain", "dyspnea"];

/// Emergency indicators only when the assessed severity is severe or extreme.
pub const SEVERE_EMERGENCY_SYMPTOMS: &[&str] = &["headache", "weakness", "abdominal_pain"];

/// Escalates an emergency to critical when it coexists with an indicator.
pub const CRITICAL_COMPANION: &str = "syncope";

/// Chronic conditions that lower the bar for an urgent review. Matched as
/// substrings of the caller's lower-cased condition names.
pub const HIGH_RISK_CONDITIONS: &[&str] = &[
    "coronary", "heart failure", "heart disease", "myocardial infarction", "copd",
    "diabetes", "immunocompromised", "chemotherapy", "transplant", "pregnan", "sickle cell",
    "kidney disease", "dialysis",
];

pub fn is_high_risk_condition(condition: &str) -> bool {
    let condition = condition.to_lowercase();
    HIGH_RISK_CONDITIONS.iter().any(|c| condition.contains(c))
}

/// Rule-out and diagnostic-planning text for emergency indicators.
pub struct EmergencyGuidance {
    pub symptom: &'static str,
    pub rule_out: &'static str,
    pub workup: &'static str,
}

pub static EMERGENCY_GUIDANCE: &[EmergencyGuidance] = &[
    EmergencyGuidance {
        symptom: "chest_pain",
        rule_out: "acute coronary syndrome, pulmonary embolism and aortic dissection",
        workup: "Obtain an ECG and troponin without delay",
    },
    EmergencyGuidance {
        symptom: "dyspnea",
        rule_out: "pulmonary embolism, pneumothorax and acute heart failure",
        workup: "Check oxygen saturation and respiratory rate",
    },
    EmergencyGuidance {
        symptom: "headache",
        rule_out: "subarachnoid hemorrhage and meningitis",
        workup: "Perform a neurological exam and consider urgent imaging",
    },
    EmergencyGuidance {
        symptom: "weakness",
        rule_out: "stroke and transient ischemic attack",
        workup: "Assess for focal neurological deficits and time of onset",
    },
    EmergencyGuidance {
        symptom: "abdominal_pain",
        rule_out: "appendicitis, bowel obstruction and perforation",
        workup: "Perform an abdominal exam and request a surgical consult",
    },
];

pub fn emergency_guidance(symptom: &str) -> Option<&'static EmergencyGuidance> {
    EMERGENCY_GUIDANCE.iter().find(|g| g.symptom == symptom)
}
