//! Cost allocation engine.
//!
//! The `engine` module turns a list of support requests into a
//! [`CostResult`]: tiered gross costs, and, for eligible billing
//! periods, a monthly free-hours credit allocated greedily across
//! requests in chronological order, with per-tier net costs.
//!
//! The computation is pure and synchronous. It never mutates its
//! inputs and allocates a fresh result on every call, so it can be
//! invoked from any number of independent contexts concurrently.

use crate::models::{CostResult, PerTier, PricingConfig, Request, TierAllocation};
use crate::timeparse;

/// Compute tiered costs for a set of requests.
///
/// `period_month` identifies the billing period as a zero-padded
/// `YYYY-MM` key. When present and at or after
/// [`PricingConfig::free_hours_start`], the monthly free-hours credit
/// is allocated across the requests in chronological order (earliest
/// work is credited first: the policy models free hours being
/// consumed as they occur, not cheapest-first or largest-first).
///
/// When `period_month` is `None` the free-hours policy is skipped
/// entirely and the result is gross-only. Free hours are a per-month
/// grant: a caller wanting a net total across several months must
/// invoke the engine once per month and sum the results (see
/// [`crate::aggregate::rollup_by_month`]).
///
/// Requests with no hour estimate bill at the configured default;
/// callers are responsible for pre-filtering by status and date range.
pub fn compute_costs(
    requests: &[Request],
    period_month: Option<&str>,
    pricing: &PricingConfig,
) -> CostResult {
    let mut result = CostResult::zero();

    // Step 1: tier bucketing and gross cost.
    for request in requests {
        let hours = pricing.hours_for(request);
        let bucket = result.tiers.get_mut(request.urgency);
        bucket.hours += hours;
        bucket.gross_cost += hours * pricing.rate(request.urgency);
    }
    result.gross_total_cost = result.tiers.iter().map(|(_, t)| t.gross_cost).sum();
    result.net_total_cost = result.gross_total_cost;

    // Step 2: free-hours eligibility. The month keys are zero-padded
    // YYYY-MM, so string comparison is chronological comparison.
    let eligible = match period_month {
        Some(month) => month >= pricing.free_hours_start.as_str() && !requests.is_empty(),
        None => false,
    };
    if !eligible {
        return result;
    }

    // Step 3: chronological greedy allocation. A request straddling
    // the quota boundary is partially covered; its remaining hours
    // bill at full rate.
    let mut ordered: Vec<&Request> = requests.iter().collect();
    ordered.sort_by(|a, b| timeparse::sort_key(a).cmp(&timeparse::sort_key(b)));

    let mut free = PerTier::<f64>::default();
    let mut remaining = pricing.free_hours_per_month;
    for request in ordered {
        if remaining <= 0.0 {
            break;
        }
        let hours = pricing.hours_for(request);
        let covered = hours.min(remaining);
        *free.get_mut(request.urgency) += covered;
        result.free_hours_applied += covered;
        result.free_hours_savings += covered * pricing.rate(request.urgency);
        remaining -= covered;
    }

    // Step 4: net cost assembly. Per-tier nets are derived from the
    // same tier rates as the savings, so they reconcile with the
    // totals exactly (up to float rounding).
    let mut allocation = PerTier::<TierAllocation>::default();
    for (tier, cost) in result.tiers.iter() {
        let tier_free = *free.get(tier);
        *allocation.get_mut(tier) = TierAllocation {
            free_hours: tier_free,
            net_cost: cost.gross_cost - tier_free * pricing.rate(tier),
        };
    }
    result.net_total_cost = result.gross_total_cost - result.free_hours_savings;
    result.allocation = Some(allocation);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrgencyTier;

    const EPSILON: f64 = 1e-6;

    fn request(date: &str, time: &str, urgency: UrgencyTier, hours: f64) -> Request {
        Request {
            date: date.to_string(),
            time: Some(time.to_string()),
            urgency,
            estimated_hours: Some(hours),
            category: None,
            description: None,
            status: Default::default(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_input_yields_zeroed_result() {
        let result = compute_costs(&[], Some("2025-06"), &PricingConfig::default());
        assert_eq!(result, CostResult::zero());
    }

    #[test]
    fn exact_quota_exhaustion() {
        // Three 4-hour Low requests against a 10-hour quota: the first
        // two are fully free, the third gets 2 free + 2 billed.
        let requests = vec![
            request("2025-06-01", "08:00", UrgencyTier::Low, 4.0),
            request("2025-06-01", "09:00", UrgencyTier::Low, 4.0),
            request("2025-06-01", "10:00", UrgencyTier::Low, 4.0),
        ];
        let result = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());

        assert_close(result.free_hours_applied, 10.0);
        assert_close(result.free_hours_savings, 2000.0);
        assert_close(result.gross_total_cost, 2400.0);
        assert_close(result.net_total_cost, 400.0);
        let allocation = result.allocation.unwrap();
        assert_close(allocation.low.free_hours, 10.0);
        assert_close(allocation.low.net_cost, 400.0);
    }

    #[test]
    fn partial_coverage_caps_at_remaining_quota() {
        // One 12-hour request against a 10-hour quota: 10 free, 2 billed.
        let requests = vec![request("2025-06-02", "08:00", UrgencyTier::Medium, 12.0)];
        let result = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());

        assert_close(result.free_hours_applied, 10.0);
        assert_close(result.free_hours_savings, 2500.0);
        assert_close(result.net_total_cost, 12.0 * 250.0 - 2500.0);
    }

    #[test]
    fn chronological_priority_over_rate() {
        // The earlier request is credited first even though the later
        // one is more expensive per hour.
        let requests = vec![
            request("2025-06-10", "09:00", UrgencyTier::High, 8.0),
            request("2025-06-01", "09:00", UrgencyTier::Low, 8.0),
        ];
        let result = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());

        let allocation = result.allocation.unwrap();
        assert_close(allocation.low.free_hours, 8.0);
        assert_close(allocation.high.free_hours, 2.0);
        assert_close(result.free_hours_savings, 8.0 * 200.0 + 2.0 * 300.0);
    }

    #[test]
    fn time_of_day_breaks_same_date_ties() {
        let requests = vec![
            request("2025-06-01", "2:00 PM", UrgencyTier::High, 10.0),
            request("2025-06-01", "9:00 AM", UrgencyTier::Low, 10.0),
        ];
        let result = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());

        // The 9 AM Low request absorbs the whole quota.
        let allocation = result.allocation.unwrap();
        assert_close(allocation.low.free_hours, 10.0);
        assert_close(allocation.high.free_hours, 0.0);
    }

    #[test]
    fn mixed_tiers_fully_covered_same_day() {
        let requests = vec![
            request("2025-06-05", "10:00", UrgencyTier::High, 1.0),
            request("2025-06-05", "11:00", UrgencyTier::Low, 1.0),
        ];
        let result = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());

        assert_close(result.free_hours_applied, 2.0);
        assert_close(result.free_hours_savings, 500.0);
        let allocation = result.allocation.unwrap();
        assert_close(allocation.high.net_cost, 0.0);
        assert_close(allocation.low.net_cost, 0.0);
        assert_close(result.net_total_cost, 0.0);
    }

    #[test]
    fn ineligible_period_passes_gross_through() {
        let requests = vec![request("2025-03-01", "09:00", UrgencyTier::Low, 3.0)];
        let pricing = PricingConfig::default();

        // Before the activation month.
        let before = compute_costs(&requests, Some("2025-03"), &pricing);
        assert_close(before.free_hours_applied, 0.0);
        assert_close(before.net_total_cost, before.gross_total_cost);
        assert!(before.allocation.is_none());

        // No period at all (multi-month / unscoped mode).
        let unscoped = compute_costs(&requests, None, &pricing);
        assert_close(unscoped.free_hours_applied, 0.0);
        assert_close(unscoped.net_total_cost, unscoped.gross_total_cost);
        assert!(unscoped.allocation.is_none());
    }

    #[test]
    fn missing_hours_bill_at_default() {
        let mut req = request("2025-06-01", "09:00", UrgencyTier::Low, 0.0);
        req.estimated_hours = None;
        let result = compute_costs(&[req], None, &PricingConfig::default());

        assert_close(result.tiers.low.hours, 0.5);
        assert_close(result.gross_total_cost, 0.5 * 200.0);
    }

    #[test]
    fn reconciliation_invariant_holds() {
        let requests = vec![
            request("2025-06-01", "9:15 AM", UrgencyTier::Promotion, 1.25),
            request("2025-06-01", "11:40 AM", UrgencyTier::High, 3.5),
            request("2025-06-02", "08:00", UrgencyTier::Medium, 2.75),
            request("2025-06-03", "1:05 PM", UrgencyTier::Low, 4.5),
            request("2025-06-07", "16:20", UrgencyTier::High, 6.0),
        ];
        let result = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());

        let allocation = result.allocation.unwrap();
        let net_sum: f64 = allocation.iter().map(|(_, a)| a.net_cost).sum();
        let free_sum: f64 = allocation.iter().map(|(_, a)| a.free_hours).sum();
        assert_close(net_sum, result.net_total_cost);
        assert_close(free_sum, result.free_hours_applied);
        assert!(result.free_hours_applied <= 10.0 + EPSILON);
        assert!(result.free_hours_savings <= result.gross_total_cost + EPSILON);
    }

    #[test]
    fn idempotent_and_non_mutating() {
        let requests = vec![
            request("2025-06-02", "10:00", UrgencyTier::Low, 7.0),
            request("2025-06-01", "10:00", UrgencyTier::High, 5.0),
        ];
        let snapshot: Vec<String> = requests.iter().map(|r| r.date.clone()).collect();

        let first = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());
        let second = compute_costs(&requests, Some("2025-06"), &PricingConfig::default());
        assert_eq!(first, second);

        // Input order is untouched; the engine sorts a copy.
        let after: Vec<String> = requests.iter().map(|r| r.date.clone()).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn injected_rate_table_overrides_defaults() {
        let mut pricing = PricingConfig::default();
        pricing.rates.low = 80.0;
        pricing.free_hours_per_month = 1.0;

        let requests = vec![request("2025-07-01", "09:00", UrgencyTier::Low, 2.0)];
        let result = compute_costs(&requests, Some("2025-07"), &pricing);

        assert_close(result.gross_total_cost, 160.0);
        assert_close(result.free_hours_savings, 80.0);
        assert_close(result.net_total_cost, 80.0);
    }
}
