pub mod errors;

pub use errors::{ConvertError, ConvertErrorCategory, ConvertResult};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Fixed output name consumed by SimpleGeo-compatible readers. The converter
/// offers no flag to override it.
pub const OUTPUT_FILE_NAME: &str = "output.inp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl ConvertRequest {
    /// Builds a request writing to `output.inp` in the current directory.
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: PathBuf::from(OUTPUT_FILE_NAME),
        }
    }

    /// Redirects the fixed output name into another directory.
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_path = output_dir.as_ref().join(OUTPUT_FILE_NAME);
        self
    }
}

/// Summary of one conversion run, serialized as JSON when a report path is
/// requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub input_path: String,
    pub output_path: String,
    pub geometry_cards: usize,
    pub zone_cards: usize,
    pub primary_zone_cards: usize,
    pub assignment_cards: usize,
    pub dropped_tail_values: usize,
}

#[cfg(test)]
mod tests {
    use super::ConvertRequest;
    use std::path::Path;

    #[test]
    fn request_defaults_to_fixed_output_name() {
        let request = ConvertRequest::new("pasin.dat");
        assert_eq!(request.output_path, Path::new("output.inp"));
    }

    #[test]
    fn output_dir_redirect_keeps_fixed_file_name() {
        let request = ConvertRequest::new("pasin.dat").with_output_dir("work/run1");
        assert_eq!(request.output_path, Path::new("work/run1/output.inp"));
    }
}
