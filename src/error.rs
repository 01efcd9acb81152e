/// Exit code for bad user input (flags, observations, files).
pub const EXIT_INPUT: u8 = 2;

/// Exit code for a fit that produced no usable candidate.
pub const EXIT_FIT: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    /// The observed value cannot anchor a relative error (zero, negative, NaN).
    pub fn invalid_observation(what: &str, value: f64) -> Self {
        Self::new(
            EXIT_INPUT,
            format!("Invalid observation: {what}={value} (must be finite and > 0)."),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn fit_failed(message: impl Into<String>) -> Self {
        Self::new(EXIT_FIT, format!("Fit failed: {}", message.into()))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
