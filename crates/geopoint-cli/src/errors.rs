use console::style;
use geopoint_core::GeopointError;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
#[derive(Clone)]
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
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
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

/// Create error for a missing point table
pub fn data_source_not_found(path: &Path) -> CliError {
    CliError::new("Point table not found")
        .with_context(format!("The specified input file does not exist.\n\nPath: {}", path.display()))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Use absolute path or path relative to current directory")
        .with_help("Run: geopoint inspect --help")
}

/// Create error for a coordinate outside its valid domain
pub fn invalid_coordinate(reason: &str) -> CliError {
    CliError::new("Invalid coordinate")
        .with_context(format!("Reason: {}", reason))
        .with_suggestion("Longitude must lie in [-180, 180] and latitude in [-90, 90]")
        .with_suggestion("Arguments are ordered lon1 lat1 lon2 lat2")
        .with_help("Run: geopoint distance --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check geopoint.toml for syntax errors")
        .with_suggestion("Or unset the matching GEOPOINT_* environment variable")
        .with_help("Run: geopoint config")
}

/// Convert a library error into a CliError with suggestions where one is known
pub fn from_geopoint(error: &GeopointError) -> Option<CliError> {
    match error {
        GeopointError::DataSourceNotFound { path } => Some(data_source_not_found(path)),
        GeopointError::CoordinateOutOfRange { .. } => Some(invalid_coordinate(&error.to_string())),
        GeopointError::ConfigInvalid { key, reason } => Some(invalid_config(key, reason)),
        GeopointError::Csv(e) => Some(
            CliError::new("Malformed point table")
                .with_context(format!("Error: {}", e))
                .with_suggestion("Check that the file has a header row")
                .with_suggestion("Or pass the right separator with --delimiter"),
        ),
        _ => None,
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return cli_error.clone();
    }

    let geopoint_error = error.chain().find_map(|e| e.downcast_ref::<GeopointError>());
    if let Some(cli_error) = geopoint_error.and_then(from_geopoint) {
        return cli_error;
    }

    let message = format!("{:#}", error);
    if message.contains("permission denied") || message.contains("Permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or choose another output location")
    } else {
        CliError::new(message)
    }
}
