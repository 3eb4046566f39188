// Core moderation module - contact-information classifier and the service
// that calls it on behalf of a logged-in principal.

pub mod checksum;
pub mod classifier;
pub mod detectors;
pub mod moderation_models;
pub mod moderation_service;
pub mod sample_cases;

pub use classifier::MessageClassifier;
pub use moderation_models::*;
pub use moderation_service::*;
pub use sample_cases::{SampleCase, SampleCategory, SAMPLE_CASES};
