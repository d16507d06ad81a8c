//! # botforge core
//!
//! Message-level primitives shared by the botforge crates: the request a
//! dialogue host hands to an action, the response it gets back, and the
//! [`Processor`] seam actions implement.

pub mod error;
pub mod processor;
pub mod request;

pub use error::{CoreError, Result};
pub use processor::{Processor, ProcessorMetadata, SharedProcessor};
pub use request::{
    IntentPrediction, Request, RequestId, RequestMetadata, Response, ResponseMetadata, SlotSet,
};
