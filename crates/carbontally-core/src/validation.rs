//! Intake validation for files before they enter the pipeline.
//!
//! Checks accumulate into a `FileValidation` instead of failing fast, so a
//! caller can show every problem with a file at once. Errors block
//! processing, warnings do not.

use std::path::Path;

use crate::error::{CarbontallyError, Result};
use crate::ingest::FileSource;

/// Accumulated validation findings for one file.
#[derive(Debug, Clone, Default)]
pub struct FileValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FileValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub struct FileValidator;

impl FileValidator {
    /// Validate that a file exists on disk and is readable
    pub fn validate_exists(path: &Path) -> FileValidation {
        let mut validation = FileValidation::default();

        if !path.exists() {
            validation
                .errors
                .push(format!("File not found: {}", path.display()));
            return validation;
        }
        if let Err(e) = std::fs::metadata(path) {
            validation.errors.push(format!("Cannot access file: {}", e));
        }

        validation
    }

    /// Validate that a file name carries one of the supported extensions
    pub fn validate_extension(file_name: &str, supported: &[String]) -> FileValidation {
        let mut validation = FileValidation::default();

        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) if supported.iter().any(|s| s.eq_ignore_ascii_case(ext)) => {}
            Some(ext) => {
                validation.errors.push(format!(
                    "Unsupported file extension: .{} (expected one of: {})",
                    ext,
                    supported.join(", ")
                ));
            }
            None => {
                validation.errors.push(format!(
                    "File has no extension (expected one of: {})",
                    supported.join(", ")
                ));
            }
        }

        validation
    }

    /// Validate content size is within the configured limit
    pub fn validate_size(source: &FileSource, max_size_mb: u64) -> FileValidation {
        let mut validation = FileValidation::default();
        let size_mb = source.size() as u64 / (1024 * 1024);

        if size_mb > max_size_mb {
            validation.errors.push(format!(
                "File size ({} MB) exceeds maximum allowed size ({} MB)",
                size_mb, max_size_mb
            ));
        } else if size_mb > max_size_mb / 2 {
            validation.warnings.push(format!(
                "Large file ({} MB) may take longer to process",
                size_mb
            ));
        }

        validation
    }

    /// Validate that the content is valid UTF-8 text
    pub fn validate_utf8(source: &FileSource) -> FileValidation {
        let mut validation = FileValidation::default();

        if std::str::from_utf8(&source.bytes).is_err() {
            validation
                .errors
                .push("File is not valid UTF-8 text".to_string());
        }

        validation
    }

    /// Validate XML well-formedness by walking the event stream
    pub fn validate_xml_structure(source: &FileSource) -> FileValidation {
        let mut validation = FileValidation::default();

        let content = match std::str::from_utf8(&source.bytes) {
            Ok(content) => content,
            Err(_) => {
                validation
                    .errors
                    .push("File is not valid UTF-8 text".to_string());
                return validation;
            }
        };

        use quick_xml::Reader;
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => {
                    validation
                        .errors
                        .push(format!("Invalid XML structure: {}", e));
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        validation
    }

    /// Merge multiple validation results
    pub fn merge_validations(validations: Vec<FileValidation>) -> FileValidation {
        let mut merged = FileValidation::default();

        for validation in validations {
            merged.errors.extend(validation.errors);
            merged.warnings.extend(validation.warnings);
        }

        merged
    }

    /// Convert a validation result to a Result type
    pub fn validation_to_result(validation: &FileValidation, file_name: &str) -> Result<()> {
        if !validation.is_valid() {
            Err(CarbontallyError::FileRejected {
                file_name: file_name.to_string(),
                reason: validation.errors.join("; "),
            })
        } else {
            Ok(())
        }
    }
}

/// Intake checks run before a source is handed to the pipeline. XML sources
/// also get a structural pass; PDF bytes are opaque and only size-checked.
pub fn pre_ingest_validation(
    source: &FileSource,
    supported: &[String],
    max_size_mb: u64,
) -> FileValidation {
    let mut validations = vec![
        FileValidator::validate_extension(&source.name, supported),
        FileValidator::validate_size(source, max_size_mb),
    ];

    let is_xml = Path::new(&source.name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
    if is_xml {
        validations.push(FileValidator::validate_xml_structure(source));
    }

    FileValidator::merge_validations(validations)
}
