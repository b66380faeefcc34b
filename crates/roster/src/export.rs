use clap::ValueEnum;
use std::fs;
use std::path::Path;

use crate::customer::Customer;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
  #[default]
  Json,
  #[value(alias = "yml")]
  Yaml,
  Csv,
}

const CSV_HEADER: [&str; 11] = [
  "id",
  "name",
  "email",
  "phone",
  "status",
  "riskScore",
  "totalOrders",
  "totalSpent",
  "averageOrderValue",
  "loyaltyPoints",
  "lastOrder",
];

/// Render customers in the requested format
pub fn render(customers: &[&Customer], format: ExportFormat) -> Result<String> {
  match format {
    ExportFormat::Json => Ok(serde_json::to_string_pretty(customers)?),
    ExportFormat::Yaml => Ok(serde_yaml::to_string(customers)?),
    ExportFormat::Csv => Ok(to_csv(customers)),
  }
}

/// Render and write to `path`, returning the number of records written
pub fn write_to(customers: &[&Customer], format: ExportFormat, path: &Path) -> Result<usize> {
  let content = render(customers, format)?;
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      fs::create_dir_all(parent)?;
    }
  }
  fs::write(path, content)?;
  Ok(customers.len())
}

fn to_csv(customers: &[&Customer]) -> String {
  let mut out = CSV_HEADER.join(",");
  out.push('\n');

  for customer in customers {
    let row = [
      customer.id.clone(),
      customer.name.clone(),
      customer.email.clone(),
      customer.phone.clone(),
      customer.status.to_string(),
      customer.risk.to_string(),
      customer.total_orders.to_string(),
      format!("{:.2}", customer.total_spent),
      format!("{:.2}", customer.average_order_value),
      customer.loyalty_points.to_string(),
      customer.last_order.to_rfc3339(),
    ];
    let cells: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
    out.push_str(&cells.join(","));
    out.push('\n');
  }

  out
}

/// Quote a cell when it holds a separator, quote or line break
fn csv_escape(cell: &str) -> String {
  if cell.contains(&[',', '"', '\n', '\r'][..]) {
    format!("\"{}\"", cell.replace('"', "\"\""))
  } else {
    cell.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::seed_customers;
  use tempfile::TempDir;

  #[test]
  fn test_csv_escape() {
    assert_eq!(csv_escape("plain"), "plain");
    assert_eq!(csv_escape("a,b"), "\"a,b\"");
    assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
  }

  #[test]
  fn test_csv_has_header_and_one_row_per_customer() {
    let customers = seed_customers();
    let refs: Vec<&Customer> = customers.iter().collect();
    let csv = render(&refs, ExportFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("id,name,email"));
    assert_eq!(
      lines[3],
      "CUST-003,Mike Johnson,mike.johnson@email.com,+1 (555) 456-7890,suspended,medium,23,1456.90,63.34,250,2024-01-10T09:20:00+00:00"
    );
  }

  #[test]
  fn test_csv_for_empty_selection_is_header_only() {
    let csv = render(&[], ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 1);
  }

  #[test]
  fn test_json_export_reloads_as_customers() {
    let customers = seed_customers();
    let refs: Vec<&Customer> = customers.iter().take(2).collect();
    let json = render(&refs, ExportFormat::Json).unwrap();
    let back: Vec<Customer> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), 2);
    assert_eq!(back[1].name, "Sarah Smith");
  }

  #[test]
  fn test_yaml_export_mentions_fields() {
    let customers = seed_customers();
    let refs: Vec<&Customer> = customers.iter().skip(3).collect();
    let yaml = render(&refs, ExportFormat::Yaml).unwrap();
    assert!(yaml.contains("name: Emma Wilson"));
    assert!(yaml.contains("riskScore: low"));
  }

  #[test]
  fn test_write_to_creates_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("reports").join("customers.csv");
    let customers = seed_customers();
    let refs: Vec<&Customer> = customers.iter().collect();

    let written = write_to(&refs, ExportFormat::Csv, &path).unwrap();
    assert_eq!(written, 4);
    assert!(fs::read_to_string(&path).unwrap().contains("Emma Wilson"));
  }
}
