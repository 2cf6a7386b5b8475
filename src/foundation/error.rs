/// Convenience result type used across Shutterbox.
pub type ShutterboxResult<T> = Result<T, ShutterboxError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShutterboxError {
    /// Invalid user-provided or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating scripted animation state.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while rasterizing into a surface.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShutterboxError {
    /// Build a [`ShutterboxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShutterboxError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ShutterboxError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ShutterboxError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ShutterboxError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            ShutterboxError::render("x")
                .to_string()
                .contains("render error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ShutterboxError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
