//! Where customer records come from
//!
//! Records are read once, checked against the schema invariants, and handed
//! to the filter and statistics functions as a plain slice.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::customer::{Customer, CustomerStatus, EmergencyContact, RiskLevel};
use crate::error::{Result, RosterError};

/// A provider of the customer collection
pub trait CustomerSource {
  fn load(&self) -> Result<Vec<Customer>>;

  /// Human readable origin, for log lines
  fn describe(&self) -> String;
}

/// The built-in sample customers
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

impl CustomerSource for SeedSource {
  fn load(&self) -> Result<Vec<Customer>> {
    let customers = seed_customers();
    validate(&customers)?;
    Ok(customers)
  }

  fn describe(&self) -> String {
    "built-in sample data".to_string()
  }
}

/// Supported on-disk encodings of a customer file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
  Json,
  Yaml,
}

impl DataFormat {
  pub fn from_path(path: &Path) -> Result<Self> {
    match path.extension().and_then(|ext| ext.to_str()).map(|ext| ext.to_lowercase()).as_deref() {
      Some("json") => Ok(DataFormat::Json),
      Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
      _ => Err(RosterError::UnsupportedFormat { path: path.to_path_buf() }),
    }
  }
}

/// A JSON or YAML array of customers on disk
#[derive(Debug, Clone)]
pub struct FileSource {
  path: PathBuf,
}

impl FileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl CustomerSource for FileSource {
  fn load(&self) -> Result<Vec<Customer>> {
    let format = DataFormat::from_path(&self.path)?;
    let content = fs::read_to_string(&self.path)?;
    let customers = parse_customers(&content, format)?;
    validate(&customers)?;

    bentley::debug!("Loaded {} customers from {}", customers.len(), self.path.display());
    Ok(customers)
  }

  fn describe(&self) -> String {
    self.path.display().to_string()
  }
}

/// Pick the file source when a path is configured, the sample data otherwise
pub fn source_for(data_path: Option<&Path>) -> Box<dyn CustomerSource> {
  match data_path {
    Some(path) => Box::new(FileSource::new(path)),
    None => Box::new(SeedSource),
  }
}

pub fn parse_customers(content: &str, format: DataFormat) -> Result<Vec<Customer>> {
  let customers = match format {
    DataFormat::Json => serde_json::from_str(content)?,
    DataFormat::Yaml => serde_yaml::from_str(content)?,
  };
  Ok(customers)
}

/// Check the invariants the rest of the crate relies on
///
/// Ids must be present and unique ignoring case, money fields finite and
/// non-negative.
/// Unknown status or risk values are tolerated and only reported.
pub fn validate(customers: &[Customer]) -> Result<()> {
  let mut seen = HashSet::new();

  for customer in customers {
    if customer.id.trim().is_empty() {
      return Err(RosterError::Validation {
        message: format!("customer '{}' has an empty id", customer.name),
      });
    }

    // Lookups by id ignore case, so uniqueness does too
    if !seen.insert(customer.id.to_lowercase()) {
      return Err(RosterError::Validation {
        message: format!("duplicate customer id '{}'", customer.id),
      });
    }

    for (field, value) in
      [("totalSpent", customer.total_spent), ("averageOrderValue", customer.average_order_value)]
    {
      if !value.is_finite() || value < 0.0 {
        return Err(RosterError::Validation {
          message: format!("{} of customer '{}' must be a non-negative number, got {}", field, customer.id, value),
        });
      }
    }

    if !customer.status.is_recognized() {
      bentley::warn!("Customer {} has unrecognized status '{}'", customer.id, customer.status);
    }
    if !customer.risk.is_recognized() {
      bentley::warn!("Customer {} has unrecognized risk score '{}'", customer.id, customer.risk);
    }
  }

  Ok(())
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single().unwrap_or_default()
}

fn contact(name: &str, phone: &str, relationship: &str) -> EmergencyContact {
  EmergencyContact {
    name: name.to_string(),
    phone: phone.to_string(),
    relationship: relationship.to_string(),
  }
}

/// The four sample customers of the back office
pub fn seed_customers() -> Vec<Customer> {
  vec![
    Customer {
      id: "CUST-001".to_string(),
      name: "John Doe".to_string(),
      email: "john.doe@email.com".to_string(),
      phone: "+1 (555) 123-4567".to_string(),
      avatar: None,
      status: CustomerStatus::Active,
      registration_date: at(2024, 1, 10, 8, 30),
      last_order: at(2024, 1, 15, 10, 30),
      total_orders: 15,
      total_spent: 892.45,
      average_order_value: 59.50,
      address: "123 Main St, City, State 12345".to_string(),
      prescriptions: 3,
      loyalty_points: 450,
      risk: RiskLevel::Low,
      notes: "Preferred customer, always pays on time".to_string(),
      medical_conditions: vec!["Diabetes".to_string(), "Hypertension".to_string()],
      insurance_provider: "Blue Cross".to_string(),
      emergency_contact: contact("Jane Doe", "+1 (555) 123-4568", "Spouse"),
    },
    Customer {
      id: "CUST-002".to_string(),
      name: "Sarah Smith".to_string(),
      email: "sarah.smith@email.com".to_string(),
      phone: "+1 (555) 987-6543".to_string(),
      avatar: None,
      status: CustomerStatus::Active,
      registration_date: at(2024, 1, 5, 14, 20),
      last_order: at(2024, 1, 14, 16, 45),
      total_orders: 8,
      total_spent: 324.78,
      average_order_value: 40.60,
      address: "456 Oak Ave, City, State 12345".to_string(),
      prescriptions: 1,
      loyalty_points: 180,
      risk: RiskLevel::Low,
      notes: String::new(),
      medical_conditions: vec!["Allergies".to_string()],
      insurance_provider: "Aetna".to_string(),
      emergency_contact: contact("Michael Smith", "+1 (555) 987-6544", "Brother"),
    },
    Customer {
      id: "CUST-003".to_string(),
      name: "Mike Johnson".to_string(),
      email: "mike.johnson@email.com".to_string(),
      phone: "+1 (555) 456-7890".to_string(),
      avatar: None,
      status: CustomerStatus::Suspended,
      registration_date: at(2023, 12, 20, 11, 15),
      last_order: at(2024, 1, 10, 9, 20),
      total_orders: 23,
      total_spent: 1456.90,
      average_order_value: 63.34,
      address: "789 Pine St, City, State 12345".to_string(),
      prescriptions: 5,
      loyalty_points: 250,
      risk: RiskLevel::Medium,
      notes: "Account suspended due to payment issues".to_string(),
      medical_conditions: vec!["Heart Disease".to_string(), "Arthritis".to_string()],
      insurance_provider: "Medicare".to_string(),
      emergency_contact: contact("Emily Johnson", "+1 (555) 456-7891", "Daughter"),
    },
    Customer {
      id: "CUST-004".to_string(),
      name: "Emma Wilson".to_string(),
      email: "emma.wilson@email.com".to_string(),
      phone: "+1 (555) 321-0987".to_string(),
      avatar: None,
      status: CustomerStatus::Inactive,
      registration_date: at(2023, 11, 15, 13, 45),
      last_order: at(2023, 12, 25, 10, 10),
      total_orders: 4,
      total_spent: 156.23,
      average_order_value: 39.06,
      address: "321 Elm St, City, State 12345".to_string(),
      prescriptions: 0,
      loyalty_points: 45,
      risk: RiskLevel::Low,
      notes: "Inactive customer, hasn't ordered in months".to_string(),
      medical_conditions: Vec::new(),
      insurance_provider: "United Healthcare".to_string(),
      emergency_contact: contact("Robert Wilson", "+1 (555) 321-0988", "Husband"),
    },
  ]
}
