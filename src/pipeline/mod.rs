pub mod anatomy;
pub mod cache;
pub mod confidence;
pub mod consolidator;
pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod orchestrator; // Parse entry point: stage order, budget, fault guard
pub mod preflight;
pub mod reasoning;
pub mod relationships;
pub mod segmenter;
pub mod severity;
pub mod temporal;
pub mod urgency;
