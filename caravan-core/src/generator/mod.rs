//! Generate candidate activities from free-form text prompts.
//!
//! The `ActivityGenerator` trait abstracts a hosted text-generation service.
//! Callers supply a prompt and receive raw text; parsing that text into
//! priced activities is the planner's job.
//!
//! Errors describe transport and service failures. The planner treats all of
//! them as soft failures and falls back to catalog data.

mod error;
mod provider;

pub use error::GenerationError;
pub use provider::ActivityGenerator;
