use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl ConvertErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    category: ConvertErrorCategory,
    code: &'static str,
    message: String,
}

impl ConvertError {
    pub fn new(
        category: ConvertErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ConvertErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ConvertErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ConvertErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> ConvertErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::{ConvertError, ConvertErrorCategory};

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ConvertErrorCategory::Success, 0),
            (ConvertErrorCategory::InputValidationError, 2),
            (ConvertErrorCategory::IoSystemError, 3),
            (ConvertErrorCategory::InternalError, 5),
        ];

        for (category, exit_code) in cases {
            assert_eq!(category.exit_code(), exit_code);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = ConvertError::io_system("IO.INPUT_OPEN", "could not open input file 'pasin.dat'");

        assert_eq!(error.exit_code(), 3);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [IO.INPUT_OPEN] could not open input file 'pasin.dat'"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 3")
        );
    }
}
