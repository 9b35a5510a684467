//! Activity generator trait for prompt-to-text services.

use super::error::GenerationError;

/// Turn a prompt into raw generated text.
///
/// Implementations must be thread-safe so a planner can be shared across
/// threads. Calls are issued sequentially by the planner; an implementation
/// never sees two concurrent calls from the same itinerary build.
///
/// # Examples
///
/// ```rust
/// use caravan_core::{ActivityGenerator, GenerationError};
///
/// struct EchoGenerator;
///
/// impl ActivityGenerator for EchoGenerator {
///     fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
///         if prompt.is_empty() {
///             return Err(GenerationError::EmptyPrompt);
///         }
///         Ok("Medina Tour - 120".to_owned())
///     }
/// }
///
/// let text = EchoGenerator.generate("List one activity in Fes")?;
/// assert!(text.contains("Medina"));
/// # Ok::<(), GenerationError>(())
/// ```
pub trait ActivityGenerator: Send + Sync {
    /// Return the generated text for `prompt`.
    ///
    /// Implementations must return `Err(GenerationError::EmptyPrompt)` when
    /// `prompt` is empty.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

impl<T: ActivityGenerator + ?Sized> ActivityGenerator for &T {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}

impl<T: ActivityGenerator + ?Sized> ActivityGenerator for Box<T> {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}
