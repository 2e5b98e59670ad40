//! Generation request and the optional JSON request file that can seed it.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Base directory used when none is configured.
pub const DEFAULT_BASE_DIRECTORY: &str = ".";

/// Fully validated description of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
  /// Go package name written into the generated file.
  pub package_name: String,
  /// Name of the package-level map variable.
  pub variable_name: String,
  /// Where the generated source is written.
  pub output_path: PathBuf,
  /// Directory patterns are resolved against and keys are relative to.
  pub base_directory: PathBuf,
  /// Glob patterns, processed in order.
  pub patterns: Vec<String>,
  /// Gzip each asset unless it is already gzipped.
  pub compress: bool,
  /// Emit progress diagnostics.
  pub verbose: bool,
}

/// A required part of the request was not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
  /// No package name.
  #[error("package name is required")]
  MissingPackage,
  /// No variable name.
  #[error("variable name is required")]
  MissingVariable,
  /// No output path.
  #[error("output path is required")]
  MissingOutput,
  /// No input patterns.
  #[error("at least one input pattern is required")]
  MissingPatterns,
}

impl GenerationRequest {
  /// Check the invariants every run depends on.
  pub fn validate(&self) -> Result<(), RequestError> {
    if self.package_name.is_empty() {
      return Err(RequestError::MissingPackage);
    }
    if self.variable_name.is_empty() {
      return Err(RequestError::MissingVariable);
    }
    if self.output_path.as_os_str().is_empty() {
      return Err(RequestError::MissingOutput);
    }
    if self.patterns.is_empty() {
      return Err(RequestError::MissingPatterns);
    }
    Ok(())
  }
}

/// Failure to load a request file.
#[derive(Debug, Error)]
pub enum RequestFileError {
  /// The file could not be read.
  #[error("cannot read request file {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The file is not a valid request document.
  #[error("cannot parse request file {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

/// Partially specified request, as read from JSON or assembled from flags.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestFile {
  /// Go package name.
  pub package_name: Option<String>,
  /// Map variable name.
  pub variable_name: Option<String>,
  /// Output file path.
  pub output_path: Option<PathBuf>,
  /// Base directory, slash separated.
  pub base_directory: Option<String>,
  /// Input patterns.
  pub patterns: Vec<String>,
  /// Enable gzip.
  pub compress: bool,
  /// Enable progress diagnostics.
  pub verbose: bool,
}

impl RequestFile {
  /// Read a request document from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self, RequestFileError> {
    let content = fs::read_to_string(path).map_err(|source| RequestFileError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| RequestFileError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Layer `overrides` on top of `self`.
  ///
  /// Set values in `overrides` win, a non-empty pattern list replaces the
  /// current one and boolean switches are enabled if either side enables them.
  pub fn merge(self, overrides: RequestFile) -> RequestFile {
    RequestFile {
      package_name: non_empty(overrides.package_name).or(self.package_name),
      variable_name: non_empty(overrides.variable_name).or(self.variable_name),
      output_path: overrides
        .output_path
        .filter(|path| !path.as_os_str().is_empty())
        .or(self.output_path),
      base_directory: non_empty(overrides.base_directory).or(self.base_directory),
      patterns: if overrides.patterns.is_empty() {
        self.patterns
      } else {
        overrides.patterns
      },
      compress: self.compress || overrides.compress,
      verbose: self.verbose || overrides.verbose,
    }
  }

  /// Turn the document into a validated request.
  pub fn into_request(self) -> Result<GenerationRequest, RequestError> {
    let base = non_empty(self.base_directory).unwrap_or_else(|| DEFAULT_BASE_DIRECTORY.into());
    let request = GenerationRequest {
      package_name: self.package_name.unwrap_or_default(),
      variable_name: self.variable_name.unwrap_or_default(),
      output_path: self.output_path.unwrap_or_default(),
      base_directory: from_slash(&base),
      patterns: self.patterns,
      compress: self.compress,
      verbose: self.verbose,
    };
    request.validate()?;
    Ok(request)
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|value| !value.is_empty())
}

/// Convert a slash separated path into the host's convention.
pub fn from_slash(path: &str) -> PathBuf {
  if MAIN_SEPARATOR == '/' {
    PathBuf::from(path)
  } else {
    PathBuf::from(path.replace('/', &MAIN_SEPARATOR.to_string()))
  }
}
