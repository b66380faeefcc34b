//! Terminal rendering of customer lists, tabs, overview cards and profiles

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use colored::*;
use console::measure_text_width;
use serde::{Deserialize, Serialize};

use crate::customer::{Customer, CustomerStatus, RiskLevel};
use crate::filter::StatusFilter;
use crate::stats::{Financials, Overview, StatusCounts};

const TOTAL_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Pretty,
  Compact,
  Json,
}

/// Dollar amount with thousands separators and two decimals, e.g. `$1,456.90`
pub fn format_money(amount: f64) -> String {
  let fixed = format!("{:.2}", amount.abs());
  let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

  let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
  for (i, digit) in whole.chars().enumerate() {
    if i > 0 && (whole.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(digit);
  }

  let sign = if amount < 0.0 { "-" } else { "" };
  format!("{sign}${grouped}.{cents}")
}

/// Convert UTC timestamp to a short local date and time
pub fn format_timestamp(utc_time: DateTime<Utc>) -> String {
  let local_time: DateTime<Local> = utc_time.into();
  local_time.format("%b %d, %Y %H:%M").to_string()
}

pub fn status_badge(status: &CustomerStatus) -> String {
  let text = format!("[{}]", status.as_str().to_uppercase());
  match status {
    CustomerStatus::Active => text.green().to_string(),
    CustomerStatus::Inactive => text.yellow().to_string(),
    CustomerStatus::Suspended => text.red().to_string(),
    CustomerStatus::Unrecognized(_) => text.dimmed().to_string(),
  }
}

pub fn risk_badge(risk: &RiskLevel) -> String {
  let text = format!("[{} RISK]", risk.as_str().to_uppercase());
  match risk {
    RiskLevel::Low => text.green().to_string(),
    RiskLevel::Medium => text.yellow().to_string(),
    RiskLevel::High => text.red().to_string(),
    RiskLevel::Unrecognized(_) => text.dimmed().to_string(),
  }
}

fn prescription_badge(customer: &Customer) -> Option<String> {
  customer.has_prescriptions().then(|| format!("[{} Rx]", customer.prescriptions).blue().to_string())
}

/// Join a left and right part, padding with spaces to the full width
fn aligned(left: &str, right: &str) -> String {
  let used = measure_text_width(left) + measure_text_width(right);
  let padding = TOTAL_WIDTH.saturating_sub(used).max(1);
  format!("{left}{}{right}", " ".repeat(padding))
}

/// Tab bar with per-status counts; the selected tab is highlighted
pub fn render_tabs(counts: &StatusCounts, selected: &StatusFilter) -> String {
  StatusFilter::tabs()
    .iter()
    .map(|tab| {
      let caption = format!("{} ({})", tab.label(), counts.get(tab));
      if tab == selected {
        caption.bold().underline().to_string()
      } else {
        caption.dimmed().to_string()
      }
    })
    .collect::<Vec<_>>()
    .join("  ")
}

/// "All customers" / "suspended customers" caption above the list
pub fn list_caption(tab: &StatusFilter) -> String {
  match tab {
    StatusFilter::All => "All customers in the system".to_string(),
    StatusFilter::Only(status) => format!("{status} customers in the system"),
  }
}

/// Two-line summary of one customer
pub fn render_row(customer: &Customer) -> String {
  let mut badges = vec![status_badge(&customer.status), risk_badge(&customer.risk)];
  badges.extend(prescription_badge(customer));

  let first_left = format!("{:<3} {}  {}", customer.initials(), customer.name.bold(), badges.join(" "));
  let first_right = format_money(customer.total_spent);
  let second_left = format!("    {} · {}", customer.email, customer.phone).dimmed().to_string();
  let second_right = format!("{} avg", format_money(customer.average_order_value)).dimmed().to_string();

  format!("{}\n{}", aligned(&first_left, &first_right), aligned(&second_left, &second_right))
}

/// The empty-state message shown when no customer survives the filter
pub fn render_empty() -> String {
  format!("{}\n{}", "No customers found".bold(), "Try adjusting your search or filter criteria.".dimmed())
}

pub fn render_list(customers: &[&Customer], counts: &StatusCounts, tab: &StatusFilter) -> String {
  let mut out = vec![render_tabs(counts, tab), "=".repeat(TOTAL_WIDTH), list_caption(tab), String::new()];

  if customers.is_empty() {
    out.push(render_empty());
  } else {
    for customer in customers {
      out.push(render_row(customer));
      out.push(String::new());
    }
    out.pop();
  }

  out.join("\n")
}

/// One tab-separated line per customer
pub fn render_compact(customers: &[&Customer]) -> String {
  customers
    .iter()
    .map(|c| {
      format!(
        "{}\t{}\t{}\t{}\t{}\t{:.2}",
        c.id, c.name, c.status, c.risk, c.email, c.total_spent
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Header cards: total customers, active customers, revenue, average order
pub fn render_overview(overview: &Overview) -> String {
  let cards = [
    ("Total Customers", overview.total_customers.to_string()),
    ("Active Customers", overview.active_customers.to_string()),
    ("Total Revenue", format_money(overview.total_revenue)),
    ("Avg Order Value", format_money(overview.average_order_value)),
  ];

  cards
    .iter()
    .map(|(title, value)| aligned(title, &value.bold().to_string()))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn render_financials(financials: &Financials, matched: usize) -> String {
  [
    aligned("Matching customers", &matched.to_string()),
    aligned("Total spent", &format_money(financials.total_spent)),
    aligned("Avg order value", &format_money(financials.average_order_value)),
  ]
  .join("\n")
}

fn section(title: &str, lines: Vec<String>) -> String {
  let mut out = vec![title.bold().to_string()];
  out.extend(lines.into_iter().map(|line| format!("  {line}")));
  out.join("\n")
}

/// Full profile of a single customer
pub fn render_profile(customer: &Customer) -> String {
  let header = format!(
    "{} {}  {} {}",
    customer.initials().bold(),
    customer.name.bold(),
    status_badge(&customer.status),
    risk_badge(&customer.risk)
  );

  let mut sections = vec![
    format!("{}\n{}", header, customer.id.dimmed()),
    bentley::banner_line(TOTAL_WIDTH, '-'),
    section(
      "Contact Information",
      vec![customer.email.clone(), customer.phone.clone(), customer.address.clone()],
    ),
    section(
      "Account Statistics",
      vec![
        format!("Total Orders:     {}", customer.total_orders),
        format!("Total Spent:      {}", format_money(customer.total_spent)),
        format!("Avg Order Value:  {}", format_money(customer.average_order_value)),
        format!("Loyalty Points:   {}", customer.loyalty_points),
        format!("Registered:       {}", format_timestamp(customer.registration_date)),
        format!("Last Order:       {}", format_timestamp(customer.last_order)),
      ],
    ),
    section(
      "Medical Information",
      vec![
        format!(
          "Medical Conditions: {}",
          if customer.medical_conditions.is_empty() {
            "None recorded".to_string()
          } else {
            customer.medical_conditions.join(", ")
          }
        ),
        format!("Prescriptions:      {}", customer.prescriptions),
        format!("Insurance Provider: {}", customer.insurance_provider),
      ],
    ),
    section(
      "Emergency Contact",
      vec![
        format!("Name:         {}", customer.emergency_contact.name),
        format!("Phone:        {}", customer.emergency_contact.phone),
        format!("Relationship: {}", customer.emergency_contact.relationship),
      ],
    ),
  ];

  if !customer.notes.is_empty() {
    sections.push(section("Notes", vec![customer.notes.clone()]));
  }

  sections.join("\n\n")
}
