//! HTTP-based activity generators for text-generation services.
//!
//! This module provides [`HttpActivityGenerator`], an implementation of
//! [`caravan_core::ActivityGenerator`] that asks an Ollama-compatible
//! service to propose activities.
//!
//! # Architecture
//!
//! Each prompt becomes one non-streaming `POST {base_url}/generate` call.
//! Transport failures map onto [`caravan_core::GenerationError`]; the
//! planner treats every such error as soft and falls back to catalog data,
//! so an unreachable service slows planning down but never fails it.
//!
//! # Example
//!
//! ```no_run
//! use caravan_core::ActivityGenerator;
//! use caravan_data::generation::{HttpActivityGenerator, HttpActivityGeneratorConfig};
//! use std::time::Duration;
//!
//! let config = HttpActivityGeneratorConfig::new("http://localhost:11434/api")
//!     .with_model("llama3.2:1b")
//!     .with_timeout(Duration::from_secs(30));
//! let generator = HttpActivityGenerator::with_config(config)?;
//!
//! let text = generator.generate("List two activities in Tangier")?;
//! println!("{text}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ollama;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_USER_AGENT, HttpActivityGenerator,
    HttpActivityGeneratorConfig, ProviderBuildError,
};
