use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account status of a customer
///
/// The closed set is active / inactive / suspended. Anything else read from a
/// data file is kept verbatim as `Unrecognized` so that reporting can degrade
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomerStatus {
  Active,
  Inactive,
  Suspended,
  Unrecognized(String),
}

impl CustomerStatus {
  /// Parse a stored status. Only the exact lowercase spellings are
  /// recognized; anything else is kept verbatim.
  pub fn parse(value: &str) -> Self {
    match value {
      "active" => CustomerStatus::Active,
      "inactive" => CustomerStatus::Inactive,
      "suspended" => CustomerStatus::Suspended,
      _ => CustomerStatus::Unrecognized(value.to_string()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      CustomerStatus::Active => "active",
      CustomerStatus::Inactive => "inactive",
      CustomerStatus::Suspended => "suspended",
      CustomerStatus::Unrecognized(raw) => raw,
    }
  }

  pub fn is_recognized(&self) -> bool {
    !matches!(self, CustomerStatus::Unrecognized(_))
  }
}

impl From<String> for CustomerStatus {
  fn from(value: String) -> Self {
    CustomerStatus::parse(&value)
  }
}

impl From<CustomerStatus> for String {
  fn from(status: CustomerStatus) -> Self {
    status.as_str().to_string()
  }
}

impl fmt::Display for CustomerStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Risk assessment attached to a customer. Display data only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
  Unrecognized(String),
}

impl RiskLevel {
  pub fn parse(value: &str) -> Self {
    match value {
      "low" => RiskLevel::Low,
      "medium" => RiskLevel::Medium,
      "high" => RiskLevel::High,
      _ => RiskLevel::Unrecognized(value.to_string()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      RiskLevel::Low => "low",
      RiskLevel::Medium => "medium",
      RiskLevel::High => "high",
      RiskLevel::Unrecognized(raw) => raw,
    }
  }

  pub fn is_recognized(&self) -> bool {
    !matches!(self, RiskLevel::Unrecognized(_))
  }
}

impl From<String> for RiskLevel {
  fn from(value: String) -> Self {
    RiskLevel::parse(&value)
  }
}

impl From<RiskLevel> for String {
  fn from(risk: RiskLevel) -> Self {
    risk.as_str().to_string()
  }
}

impl fmt::Display for RiskLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
  pub name: String,
  pub phone: String,
  pub relationship: String,
}

/// A single customer record as held by the back office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
  pub id: String,
  pub name: String,
  pub email: String,
  pub phone: String,
  #[serde(default)]
  pub avatar: Option<String>,
  pub status: CustomerStatus,
  pub registration_date: DateTime<Utc>,
  pub last_order: DateTime<Utc>,
  pub total_orders: u32,
  pub total_spent: f64,
  pub average_order_value: f64,
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub prescriptions: u32,
  #[serde(default)]
  pub loyalty_points: u32,
  #[serde(rename = "riskScore")]
  pub risk: RiskLevel,
  #[serde(default)]
  pub notes: String,
  #[serde(default)]
  pub medical_conditions: Vec<String>,
  #[serde(default)]
  pub insurance_provider: String,
  #[serde(default)]
  pub emergency_contact: EmergencyContact,
}

impl Customer {
  /// First letter of each word in the name, used in place of a missing avatar
  pub fn initials(&self) -> String {
    self.name.split_whitespace().filter_map(|word| word.chars().next()).collect()
  }

  pub fn has_prescriptions(&self) -> bool {
    self.prescriptions > 0
  }

  /// Whether the customer's name, email or id contains `needle`.
  /// `needle` must already be lowercase.
  pub(crate) fn mentions(&self, needle: &str) -> bool {
    [&self.name, &self.email, &self.id].iter().any(|field| field.to_lowercase().contains(needle))
  }
}
