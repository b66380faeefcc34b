use serde::Serialize;
use std::path::Path;

use crate::customer::Customer;
use crate::display::{self, OutputFormat};
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::filter::{find_customer, CustomerQuery};
use crate::stats::{aggregate_financials, aggregate_status_counts, overview, Financials, Overview, StatusCounts};

/// Everything the stats command reports, in one serializable value
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
  /// Tab counts over the whole collection
  pub counts: StatusCounts,
  /// Header cards over the whole collection
  pub overview: Overview,
  /// Number of customers matching the query
  pub matched: usize,
  /// Spend figures over the matching customers
  pub financials: Financials,
}

pub fn stats_report(customers: &[Customer], query: &CustomerQuery) -> StatsReport {
  let matching = query.apply(customers);
  StatsReport {
    counts: aggregate_status_counts(customers),
    overview: overview(customers),
    matched: matching.len(),
    financials: aggregate_financials(matching.iter().copied()),
  }
}

/// The customer list for a query, with tab counts over the whole collection
pub fn list_customers(customers: &[Customer], query: &CustomerQuery, format: OutputFormat) -> Result<String> {
  let matching = query.apply(customers);
  tracing::debug!(matched = matching.len(), total = customers.len(), search = %query.search, "filtered customers");

  match format {
    OutputFormat::Pretty => {
      let counts = aggregate_status_counts(customers);
      Ok(display::render_list(&matching, &counts, &query.tab))
    }
    OutputFormat::Compact => Ok(display::render_compact(&matching)),
    OutputFormat::Json => Ok(serde_json::to_string_pretty(&matching)?),
  }
}

pub fn customer_stats(customers: &[Customer], query: &CustomerQuery, format: OutputFormat) -> Result<String> {
  let report = stats_report(customers, query);

  match format {
    OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
    OutputFormat::Compact => Ok(format!(
      "all={}\tactive={}\tinactive={}\tsuspended={}\tunrecognized={}\tmatched={}\ttotalSpent={:.2}\taverageOrderValue={:.2}",
      report.counts.all,
      report.counts.active,
      report.counts.inactive,
      report.counts.suspended,
      report.counts.unrecognized,
      report.matched,
      report.financials.total_spent,
      report.financials.average_order_value
    )),
    OutputFormat::Pretty => {
      let mut out = vec![
        display::render_overview(&report.overview),
        String::new(),
        display::render_tabs(&report.counts, &query.tab),
        String::new(),
        display::render_financials(&report.financials, report.matched),
      ];
      if report.counts.unrecognized > 0 {
        out.push(format!("{} customer(s) with an unrecognized status", report.counts.unrecognized));
      }
      Ok(out.join("\n"))
    }
  }
}

/// Profile of a single customer
pub fn show_customer(customers: &[Customer], id: &str, format: OutputFormat) -> Result<String> {
  let customer = find_customer(customers, id)?;

  match format {
    OutputFormat::Pretty => Ok(display::render_profile(customer)),
    OutputFormat::Compact => Ok(display::render_compact(&[customer])),
    OutputFormat::Json => Ok(serde_json::to_string_pretty(customer)?),
  }
}

/// Export the matching customers; returns the rendered text when no output
/// path is given, otherwise writes the file and returns `None`
pub fn export_customers(
  customers: &[Customer],
  query: &CustomerQuery,
  format: ExportFormat,
  output: Option<&Path>,
) -> Result<Option<String>> {
  let matching = query.apply(customers);

  match output {
    Some(path) => {
      let written = export::write_to(&matching, format, path)?;
      bentley::success!("Exported {} customers to {}", written, path.display());
      Ok(None)
    }
    None => Ok(Some(export::render(&matching, format)?)),
  }
}

/// Summary line for a collection that passed validation
pub fn validation_summary(customers: &[Customer], origin: &str) -> String {
  let counts = aggregate_status_counts(customers);
  let unknown_risk = customers.iter().filter(|c| !c.risk.is_recognized()).count();

  let mut summary = format!("{} customers from {} passed validation", customers.len(), origin);
  if counts.unrecognized > 0 || unknown_risk > 0 {
    summary.push_str(&format!(
      " ({} unrecognized status, {} unrecognized risk score)",
      counts.unrecognized, unknown_risk
    ));
  }
  summary
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::customer::{CustomerStatus, RiskLevel};
  use crate::error::RosterError;
  use crate::filter::StatusFilter;
  use crate::source::seed_customers;
  use tempfile::TempDir;

  #[test]
  fn test_list_json_contains_only_matches() {
    let customers = seed_customers();
    let query = CustomerQuery::new("sarah", StatusFilter::All, StatusFilter::All);
    let out = list_customers(&customers, &query, OutputFormat::Json).unwrap();
    let parsed: Vec<Customer> = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].name, "Sarah Smith");
  }

  #[test]
  fn test_list_pretty_counts_whole_collection() {
    let customers = seed_customers();
    let query = CustomerQuery::new("", StatusFilter::Only(CustomerStatus::Suspended), StatusFilter::All);
    let out = console::strip_ansi_codes(&list_customers(&customers, &query, OutputFormat::Pretty).unwrap()).to_string();
    assert!(out.contains("All Customers (4)"));
    assert!(out.contains("Mike Johnson"));
    assert!(!out.contains("John Doe"));
  }

  #[test]
  fn test_stats_report_mixes_full_and_filtered() {
    let customers = seed_customers();
    let query = CustomerQuery::new("", StatusFilter::All, StatusFilter::Only(CustomerStatus::Inactive));
    let report = stats_report(&customers, &query);
    assert_eq!(report.counts.all, 4);
    assert_eq!(report.overview.total_customers, 4);
    assert_eq!(report.matched, 1);
    assert!((report.financials.total_spent - 156.23).abs() < 1e-9);
  }

  #[test]
  fn test_stats_json_shape() {
    let customers = seed_customers();
    let out = customer_stats(&customers, &CustomerQuery::default(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["counts"]["active"], 2);
    assert_eq!(value["counts"]["suspended"], 1);
    assert_eq!(value["matched"], 4);
    assert!(value["financials"]["totalSpent"].is_number());
  }

  #[test]
  fn test_stats_on_empty_collection() {
    let out = customer_stats(&[], &CustomerQuery::default(), OutputFormat::Compact).unwrap();
    assert!(out.starts_with("all=0\tactive=0\tinactive=0\tsuspended=0"));
    assert!(out.contains("totalSpent=0.00\taverageOrderValue=0.00"));
  }

  #[test]
  fn test_show_unknown_customer() {
    let customers = seed_customers();
    let result = show_customer(&customers, "CUST-404", OutputFormat::Pretty);
    assert!(matches!(result, Err(RosterError::NotFound { .. })));
  }

  #[test]
  fn test_show_json() {
    let customers = seed_customers();
    let out = show_customer(&customers, "cust-001", OutputFormat::Json).unwrap();
    let customer: Customer = serde_json::from_str(&out).unwrap();
    assert_eq!(customer, customers[0]);
  }

  #[test]
  fn test_export_to_stdout_and_file() {
    let customers = seed_customers();
    let query = CustomerQuery::new("", StatusFilter::Only(CustomerStatus::Active), StatusFilter::All);

    let text = export_customers(&customers, &query, ExportFormat::Csv, None).unwrap().unwrap();
    assert_eq!(text.lines().count(), 3);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("active.json");
    let result = export_customers(&customers, &query, ExportFormat::Json, Some(path.as_path())).unwrap();
    assert!(result.is_none());
    let saved: Vec<Customer> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved.len(), 2);
  }

  #[test]
  fn test_validation_summary_mentions_unrecognized_values() {
    let mut customers = seed_customers();
    assert_eq!(
      validation_summary(&customers, "seed"),
      "4 customers from seed passed validation"
    );

    customers[0].status = CustomerStatus::parse("archived");
    customers[1].risk = RiskLevel::parse("severe");
    assert!(validation_summary(&customers, "seed").ends_with("(1 unrecognized status, 1 unrecognized risk score)"));
  }
}
