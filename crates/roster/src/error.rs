use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Invalid YAML: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Invalid customer data: {message}")]
  Validation { message: String },

  #[error("Unsupported data format for '{}' (expected .json, .yaml or .yml)", path.display())]
  UnsupportedFormat { path: PathBuf },

  #[error("Customer '{id}' not found")]
  NotFound { id: String },

  #[error("Invalid filter value '{value}' (expected all, active, inactive or suspended)")]
  InvalidFilter { value: String },
}

pub type Result<T> = std::result::Result<T, RosterError>;
