use thiserror::Error;

/// Failures of the 3D layer. Any of these moves the shell into its failed state.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No adapter compatible with the window surface.
    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// Surface error that reconfiguring cannot fix.
    #[error("surface error: {0}")]
    Frame(wgpu::SurfaceError),

    /// A frame callback or the scene pass panicked.
    #[error("render panicked: {0}")]
    Panic(String),
}

impl RenderError {
    /// Builds a `Panic` from a `catch_unwind` payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        RenderError::Panic(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_keep_their_message() {
        let err = RenderError::from_panic(Box::new("boom"));
        assert_eq!(err.to_string(), "render panicked: boom");

        let err = RenderError::from_panic(Box::new(String::from("owned")));
        assert_eq!(err.to_string(), "render panicked: owned");

        let err = RenderError::from_panic(Box::new(7_u32));
        assert_eq!(err.to_string(), "render panicked: unknown panic");
    }
}
