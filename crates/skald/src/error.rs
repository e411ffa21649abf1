//! Error categories for resource creation.
//!
//! These cover the *resource* error class: failures while building GPU
//! resources or parsing font data. They abort construction and carry the
//! backend's diagnostic text. Misuse of the `begin`/`draw`/`end` state
//! machine is a caller bug and panics instead — see
//! [`SpriteBatch`](crate::render2d::SpriteBatch).

/// Errors raised while creating renderer resources.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Shading program compilation, linking, or pipeline validation failed.
    /// Carries the backend's diagnostic output verbatim.
    #[error("shading program error: {0}")]
    Program(String),

    /// Font data could not be parsed or rasterized.
    #[error("font error: {0}")]
    Font(String),
}
