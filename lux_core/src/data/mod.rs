//! Color-naming survey data consumed by evaluation.

pub mod survey;

pub use survey::{InMemorySurvey, LabeledObservation, SurveyDataset, SurveySplit};
