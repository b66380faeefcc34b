//! Derived statistics over a customer collection

use serde::Serialize;

use crate::customer::{Customer, CustomerStatus};
use crate::filter::StatusFilter;

/// Number of customers per status, plus the total
///
/// Statuses outside the closed set are counted in `unrecognized` only, so
/// `active + inactive + suspended + unrecognized == all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
  pub all: usize,
  pub active: usize,
  pub inactive: usize,
  pub suspended: usize,
  pub unrecognized: usize,
}

impl StatusCounts {
  /// Count shown next to a tab, always equal to the number of customers the
  /// same tab lets through
  pub fn get(&self, tab: &StatusFilter) -> usize {
    match tab {
      StatusFilter::All => self.all,
      StatusFilter::Only(CustomerStatus::Active) => self.active,
      StatusFilter::Only(CustomerStatus::Inactive) => self.inactive,
      StatusFilter::Only(CustomerStatus::Suspended) => self.suspended,
      StatusFilter::Only(CustomerStatus::Unrecognized(_)) => 0,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
  pub total_spent: f64,
  pub average_order_value: f64,
}

/// The four header cards of the customer page
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
  pub total_customers: usize,
  pub active_customers: usize,
  pub total_revenue: f64,
  pub average_order_value: f64,
}

pub fn aggregate_status_counts<'a, I>(records: I) -> StatusCounts
where
  I: IntoIterator<Item = &'a Customer>,
{
  records.into_iter().fold(StatusCounts::default(), |mut counts, customer| {
    counts.all += 1;
    match customer.status {
      CustomerStatus::Active => counts.active += 1,
      CustomerStatus::Inactive => counts.inactive += 1,
      CustomerStatus::Suspended => counts.suspended += 1,
      CustomerStatus::Unrecognized(_) => counts.unrecognized += 1,
    }
    counts
  })
}

/// Total spend, and the mean of the per-customer average order value.
/// Both are zero for an empty collection.
pub fn aggregate_financials<'a, I>(records: I) -> Financials
where
  I: IntoIterator<Item = &'a Customer>,
{
  let (count, total_spent, aov_sum) = records
    .into_iter()
    .fold((0usize, 0.0f64, 0.0f64), |(count, spent, aov), customer| {
      (count + 1, spent + customer.total_spent, aov + customer.average_order_value)
    });

  let average_order_value = if count == 0 { 0.0 } else { aov_sum / count as f64 };

  Financials { total_spent, average_order_value }
}

pub fn overview(records: &[Customer]) -> Overview {
  let counts = aggregate_status_counts(records);
  let financials = aggregate_financials(records);

  Overview {
    total_customers: counts.all,
    active_customers: counts.active,
    total_revenue: financials.total_spent,
    average_order_value: financials.average_order_value,
  }
}
