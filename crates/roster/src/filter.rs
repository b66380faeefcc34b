//! Customer filtering
//!
//! A customer is kept when it satisfies all three criteria at once: the free
//! text search, the status dropdown and the selected tab. The status and tab
//! constraints are independent, so a "suspended" status with an "active" tab
//! yields nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::customer::{Customer, CustomerStatus};
use crate::error::RosterError;

/// A status constraint, or `All` for no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
  #[default]
  All,
  Only(CustomerStatus),
}

impl StatusFilter {
  /// The four tabs of the customer page, in display order
  pub fn tabs() -> [StatusFilter; 4] {
    [
      StatusFilter::All,
      StatusFilter::Only(CustomerStatus::Active),
      StatusFilter::Only(CustomerStatus::Inactive),
      StatusFilter::Only(CustomerStatus::Suspended),
    ]
  }

  /// Whether a customer with `status` passes this constraint
  pub fn allows(&self, status: &CustomerStatus) -> bool {
    match self {
      StatusFilter::All => true,
      StatusFilter::Only(wanted) => status.is_recognized() && wanted == status,
    }
  }

  /// Tab caption, e.g. "All Customers" or "Suspended"
  pub fn label(&self) -> &'static str {
    match self {
      StatusFilter::All => "All Customers",
      StatusFilter::Only(CustomerStatus::Active) => "Active",
      StatusFilter::Only(CustomerStatus::Inactive) => "Inactive",
      StatusFilter::Only(CustomerStatus::Suspended) => "Suspended",
      StatusFilter::Only(CustomerStatus::Unrecognized(_)) => "Other",
    }
  }
}

impl FromStr for StatusFilter {
  type Err = RosterError;

  /// Case-insensitive, for values typed on the command line or in config
  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let normalized = value.trim().to_lowercase();
    if normalized == "all" {
      return Ok(StatusFilter::All);
    }
    match CustomerStatus::parse(&normalized) {
      CustomerStatus::Unrecognized(_) => {
        Err(RosterError::InvalidFilter { value: value.to_string() })
      }
      status => Ok(StatusFilter::Only(status)),
    }
  }
}

impl TryFrom<String> for StatusFilter {
  type Error = RosterError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<StatusFilter> for String {
  fn from(filter: StatusFilter) -> Self {
    filter.to_string()
  }
}

impl fmt::Display for StatusFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StatusFilter::All => f.write_str("all"),
      StatusFilter::Only(status) => write!(f, "{status}"),
    }
  }
}

/// The three filter inputs of the customer page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerQuery {
  pub search: String,
  pub status: StatusFilter,
  pub tab: StatusFilter,
}

impl CustomerQuery {
  pub fn new(search: impl Into<String>, status: StatusFilter, tab: StatusFilter) -> Self {
    Self { search: search.into(), status, tab }
  }

  pub fn matches(&self, customer: &Customer) -> bool {
    matches_search(customer, &self.search.to_lowercase())
      && self.status.allows(&customer.status)
      && self.tab.allows(&customer.status)
  }

  pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Customer>
  where
    I: IntoIterator<Item = &'a Customer>,
  {
    filter(records, &self.search, &self.status, &self.tab)
  }
}

fn matches_search(customer: &Customer, needle: &str) -> bool {
  needle.is_empty() || customer.mentions(needle)
}

/// Keep the customers matching the search text, status and tab, in their
/// original order. An empty result is a valid answer.
pub fn filter<'a, I>(
  records: I,
  query: &str,
  status_filter: &StatusFilter,
  tab_status: &StatusFilter,
) -> Vec<&'a Customer>
where
  I: IntoIterator<Item = &'a Customer>,
{
  let needle = query.to_lowercase();
  records
    .into_iter()
    .filter(|customer| {
      matches_search(customer, &needle)
        && status_filter.allows(&customer.status)
        && tab_status.allows(&customer.status)
    })
    .collect()
}

/// Look up a customer by id, ignoring case
pub fn find_customer<'a>(records: &'a [Customer], id: &str) -> Result<&'a Customer, RosterError> {
  records
    .iter()
    .find(|customer| customer.id.eq_ignore_ascii_case(id.trim()))
    .ok_or_else(|| RosterError::NotFound { id: id.to_string() })
}
