use console::style;
use std::fmt;
use std::path::Path;

/// Error type with fix suggestions for terminal display
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        let mut rendered = format!(
            "{} {}\n",
            style("✗").red().bold(),
            style(&self.message).red().bold()
        );

        if let Some(ref context) = self.context {
            rendered.push_str(&format!("\n{}\n", context));
        }

        if !self.suggestions.is_empty() {
            rendered.push_str(&format!("\n{}\n", style("To fix this:").yellow().bold()));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                rendered.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if let Some(ref help_cmd) = self.help_command {
            rendered.push_str(&format!(
                "\n{} {}\n",
                style("Need help?").cyan(),
                style(help_cmd).cyan().bold()
            ));
        }

        eprint!("{}", rendered);
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a path that does not exist
pub fn file_not_found(path: &Path) -> CliError {
    CliError::new("File not found")
        .with_context(format!(
            "The given path does not exist.\n\nPath: {}",
            path.display()
        ))
        .with_suggestion("Check the path and try again")
        .with_suggestion("Use an absolute path or a path relative to the current directory")
        .with_help("Run: carbontally process --help")
}

/// Create error for a scan that turned up nothing usable
pub fn no_supported_files() -> CliError {
    CliError::new("No supported files found")
        .with_context("None of the given paths contained an XML or PDF energy report.")
        .with_suggestion("Point at .xml or .pdf files directly")
        .with_suggestion("Or scan subdirectories with --recursive")
        .with_help("Run: carbontally formats")
}

/// Create error for a batch where intake rejected every file
pub fn all_files_rejected() -> CliError {
    CliError::new("All files were rejected")
        .with_context("Every file failed validation before processing started.")
        .with_suggestion("Check the messages above for the reason per file")
        .with_suggestion("Raise the size limit with --max-file-size-mb if files were too large")
        .with_help("Run: carbontally process --help")
}

/// Create error for a batch where every file failed during ingestion
pub fn all_files_failed() -> CliError {
    CliError::new("No files could be processed")
        .with_context("Every file in the batch failed during ingestion.")
        .with_suggestion("Check the per-file errors above")
        .with_suggestion("Run with --json for machine-readable error details")
        .with_help("Run: carbontally process --help")
}
