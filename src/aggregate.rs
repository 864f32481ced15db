//! Grouping helpers for the dashboard's charts and tables.
//!
//! Pure functions over a request list: daily activity counts,
//! category shares, and the month-by-month cost rollup. The rollup
//! invokes the cost engine once per calendar month so the free-hours
//! quota resets every period; months are independent, so the
//! per-month calls run on the [`rayon`] thread pool.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::compute_costs;
use crate::models::{CostResult, PricingConfig, Request, UrgencyTier};

/// Request counts for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub total: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// One category's share of the request volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Share of all requests, 0-100. Rounded independently per
    /// category, so the column sums to 100 only up to rounding.
    pub percentage: f64,
}

/// Cost result for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCosts {
    /// `YYYY-MM`.
    pub month: String,
    pub costs: CostResult,
}

/// Group requests by date, ascending, with per-tier counts.
///
/// Promotion requests count toward `total` only; the dashboard's
/// activity chart stacks the three billable-urgency series.
pub fn by_day(requests: &[Request]) -> Vec<DailyActivity> {
    let mut days: BTreeMap<&str, DailyActivity> = BTreeMap::new();
    for request in requests {
        let day = days
            .entry(request.date.as_str())
            .or_insert_with(|| DailyActivity {
                date: request.date.clone(),
                total: 0,
                low: 0,
                medium: 0,
                high: 0,
            });
        day.total += 1;
        match request.urgency {
            UrgencyTier::Low => day.low += 1,
            UrgencyTier::Medium => day.medium += 1,
            UrgencyTier::High => day.high += 1,
            UrgencyTier::Promotion => {}
        }
    }
    days.into_values().collect()
}

/// Group requests by category with each category's percentage of the
/// total, sorted by count descending (category name ascending on
/// ties). Requests without a category fall under
/// [`crate::classify::GENERAL_SUPPORT`]. Empty input yields an empty
/// vector; percentages are never computed against a zero total.
pub fn by_category(requests: &[Request]) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for request in requests {
        let category = request
            .category
            .as_deref()
            .unwrap_or(crate::classify::GENERAL_SUPPORT);
        *counts.entry(category).or_insert(0) += 1;
    }

    let total = requests.len();
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            count,
            percentage: (count as f64 / total as f64) * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    shares
}

/// Compute costs month by month, ascending by month key.
///
/// Requests are grouped on the `YYYY-MM` prefix of their date and the
/// engine is invoked once per group with that month as the billing
/// period, so each month gets its own free-hours quota.
pub fn rollup_by_month(requests: &[Request], pricing: &PricingConfig) -> Vec<MonthlyCosts> {
    let mut months: BTreeMap<&str, Vec<&Request>> = BTreeMap::new();
    for request in requests {
        let month = request.date.get(..7).unwrap_or(request.date.as_str());
        months.entry(month).or_default().push(request);
    }

    // BTreeMap iteration is ascending and collect preserves order, so
    // the parallel map keeps months sorted.
    months
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(month, group)| {
            let group: Vec<Request> = group.into_iter().cloned().collect();
            MonthlyCosts {
                month: month.to_string(),
                costs: compute_costs(&group, Some(month), pricing),
            }
        })
        .collect()
}
