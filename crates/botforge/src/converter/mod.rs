//! Question bank to NLU training data conversion

pub mod dataset;
pub mod error;
pub mod service;

pub use dataset::{NLU_FORMAT_VERSION, NluEntry, TrainingDataset};
pub use error::{ConvertError, Result};
pub use service::{ConversionSummary, FormatConverter};
