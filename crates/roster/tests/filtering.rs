use anyhow::Result;
use roster::source::seed_customers;
use roster::{
  aggregate_financials, aggregate_status_counts, filter, Customer, CustomerQuery, CustomerStatus, RosterConfig,
  StatusFilter,
};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn every_filter() -> Vec<StatusFilter> {
  StatusFilter::tabs().to_vec()
}

fn sample_queries() -> Vec<&'static str> {
  vec!["", "a", "SMITH", "cust-00", "@email.com", "zzz"]
}

/// Seed data plus a few variations, including an out-of-set status
fn collections() -> Vec<Vec<Customer>> {
  let seed = seed_customers();

  let mut reversed = seed.clone();
  reversed.reverse();

  let mut odd = seed.clone();
  odd[2].status = CustomerStatus::parse("on-hold");

  vec![Vec::new(), seed.clone(), reversed, odd, seed[..1].to_vec()]
}

#[test]
fn test_unconstrained_filter_is_identity() {
  for customers in collections() {
    let result = filter(&customers, "", &StatusFilter::All, &StatusFilter::All);
    let expected: Vec<&Customer> = customers.iter().collect();
    assert_eq!(result, expected);
  }
}

#[test]
fn test_filter_is_idempotent_for_all_inputs() {
  for customers in collections() {
    for query in sample_queries() {
      for status in every_filter() {
        for tab in every_filter() {
          let once = filter(&customers, query, &status, &tab);
          let twice = filter(once.iter().copied(), query, &status, &tab);
          assert_eq!(once, twice, "query={query:?} status={status} tab={tab}");
        }
      }
    }
  }
}

#[test]
fn test_filter_preserves_relative_order() {
  for customers in collections() {
    for query in sample_queries() {
      let result = filter(&customers, query, &StatusFilter::All, &StatusFilter::All);
      let positions: Vec<usize> = result
        .iter()
        .map(|kept| customers.iter().position(|c| std::ptr::eq(c, *kept)).unwrap())
        .collect();
      assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
  }
}

#[test]
fn test_known_counts_sum_to_total_for_well_formed_input() {
  let seed = seed_customers();
  for customers in [Vec::new(), seed.clone(), seed[1..].to_vec()] {
    let counts = aggregate_status_counts(&customers);
    assert_eq!(counts.active + counts.inactive + counts.suspended, customers.len());
    assert_eq!(counts.all, customers.len());
  }
}

#[test]
fn test_counts_always_account_for_every_record() {
  for customers in collections() {
    let counts = aggregate_status_counts(&customers);
    assert_eq!(counts.active + counts.inactive + counts.suspended + counts.unrecognized, counts.all);
  }
}

#[test]
fn test_tab_counts_match_tab_filter_sizes() {
  for customers in collections() {
    let counts = aggregate_status_counts(&customers);
    for tab in every_filter() {
      let shown = filter(&customers, "", &StatusFilter::All, &tab).len();
      assert_eq!(counts.get(&tab), shown, "tab={tab}");
    }
  }
}

#[test]
fn test_unrecognized_tab_count_matches_filter_size() {
  for customers in collections() {
    let counts = aggregate_status_counts(&customers);
    let tab = StatusFilter::Only(CustomerStatus::parse("on-hold"));
    assert_eq!(counts.get(&tab), filter(&customers, "", &StatusFilter::All, &tab).len());
  }
}

#[test]
fn test_status_spelling_outside_closed_set_is_unrecognized() -> Result<()> {
  let mut value = serde_json::to_value(seed_customers())?;
  value[0]["status"] = serde_json::Value::from("Active");
  value[2]["status"] = serde_json::Value::from("SUSPENDED ");
  let customers: Vec<Customer> = serde_json::from_value(value)?;

  let counts = aggregate_status_counts(&customers);
  assert_eq!((counts.active, counts.suspended, counts.unrecognized), (1, 0, 2));

  let active = filter(&customers, "", &"active".parse()?, &StatusFilter::All);
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].name, "Sarah Smith");

  // Written back exactly as read
  let exported = serde_json::to_value(&customers)?;
  assert_eq!(exported[0]["status"], "Active");
  assert_eq!(exported[2]["status"], "SUSPENDED ");
  Ok(())
}

#[test]
fn test_empty_financials_boundary() {
  let financials = aggregate_financials(&Vec::<Customer>::new());
  assert_eq!(financials.total_spent, 0.0);
  assert_eq!(financials.average_order_value, 0.0);
}

#[test]
fn test_sample_scenarios() {
  let customers = seed_customers();

  let counts = aggregate_status_counts(&customers);
  assert_eq!((counts.all, counts.active, counts.inactive, counts.suspended), (4, 2, 1, 1));

  let sarah = filter(&customers, "sarah", &StatusFilter::All, &StatusFilter::All);
  assert_eq!(sarah.len(), 1);
  assert_eq!(sarah[0].name, "Sarah Smith");

  let suspended = CustomerQuery::new("", "suspended".parse().unwrap(), "all".parse().unwrap()).apply(&customers);
  assert_eq!(suspended.len(), 1);
  assert_eq!(suspended[0].name, "Mike Johnson");
}

#[test]
#[serial]
fn test_config_is_found_in_working_directory() -> Result<()> {
  let temp = TempDir::new()?;
  fs::write(temp.path().join(".roster.json"), r#"{ "default_tab": "suspended" }"#)?;

  let original = env::current_dir()?;
  env::set_current_dir(temp.path())?;
  let loaded = RosterConfig::load(None);
  env::set_current_dir(original)?;

  assert_eq!(loaded?.default_tab, StatusFilter::Only(CustomerStatus::Suspended));
  Ok(())
}
