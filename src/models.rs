//! Data models for the billing engine.
//!
//! The `models` module defines the serialisable structs and enums
//! representing support requests, pricing configuration and computed
//! cost results. These types derive `Serialize` and `Deserialize` so
//! that they can cross the HTTP boundary or be read from JSON files;
//! the engine itself only ever borrows them.

use serde::{Deserialize, Serialize};

/// Urgency tier of a support request.
///
/// The set of tiers is closed: a request carrying any other tier
/// string fails deserialisation at the boundary instead of silently
/// billing at no rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyTier {
    /// Promotional / goodwill work, billed at the lowest rate.
    Promotion,
    /// Regular turnaround.
    Low,
    /// Same-day turnaround.
    Medium,
    /// Emergency turnaround.
    High,
}

impl UrgencyTier {
    /// All tiers, in rate-table order.
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Promotion,
        UrgencyTier::Low,
        UrgencyTier::Medium,
        UrgencyTier::High,
    ];

    /// Display label, matching the dashboard's tier names.
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Promotion => "Promotion",
            UrgencyTier::Low => "Low",
            UrgencyTier::Medium => "Medium",
            UrgencyTier::High => "High",
        }
    }
}

/// Lifecycle flag for a request. The engine never filters by status;
/// callers pre-filter before handing requests in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Active,
    Deleted,
}

/// A single support request (ticket, SMS or email) as sourced from
/// the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Billing-relevant calendar date, zero-padded `YYYY-MM-DD`.
    /// Dates are kept as strings on purpose: lexicographic order on
    /// this form is chronological order, with no timezone drift.
    pub date: String,
    /// Local time of day, free-form (`"9:30 AM"` or `"14:05"`). Used
    /// only to break ties in chronological ordering within a date.
    #[serde(default)]
    pub time: Option<String>,
    /// Urgency tier, which selects the hourly rate.
    pub urgency: UrgencyTier,
    /// Estimated hours of work. When absent the engine substitutes
    /// [`PricingConfig::default_hours`].
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// Category label for grouping and display. Not used in pricing.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text description of the work.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

/// A value per urgency tier. Keeps per-tier accumulation total: every
/// tier has exactly one slot, so nothing can be dropped or invented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerTier<T> {
    pub promotion: T,
    pub low: T,
    pub medium: T,
    pub high: T,
}

impl<T> PerTier<T> {
    pub fn get(&self, tier: UrgencyTier) -> &T {
        match tier {
            UrgencyTier::Promotion => &self.promotion,
            UrgencyTier::Low => &self.low,
            UrgencyTier::Medium => &self.medium,
            UrgencyTier::High => &self.high,
        }
    }

    pub fn get_mut(&mut self, tier: UrgencyTier) -> &mut T {
        match tier {
            UrgencyTier::Promotion => &mut self.promotion,
            UrgencyTier::Low => &mut self.low,
            UrgencyTier::Medium => &mut self.medium,
            UrgencyTier::High => &mut self.high,
        }
    }

    /// Iterate `(tier, value)` pairs in rate-table order.
    pub fn iter(&self) -> impl Iterator<Item = (UrgencyTier, &T)> {
        UrgencyTier::ALL.iter().map(move |&t| (t, self.get(t)))
    }
}

/// Static pricing configuration. Always passed explicitly into the
/// engine; there is no module-level rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Hourly rate per urgency tier, in whole currency units.
    pub rates: PerTier<f64>,
    /// Free hours granted per calendar month.
    pub free_hours_per_month: f64,
    /// First month (`YYYY-MM`) the free-hours policy applies to.
    /// Compared lexicographically against period month keys.
    pub free_hours_start: String,
    /// Fallback hours for a request with no estimate.
    pub default_hours: f64,
}

impl PricingConfig {
    /// Hourly rate for a tier.
    pub fn rate(&self, tier: UrgencyTier) -> f64 {
        *self.rates.get(tier)
    }

    /// Hours attributed to a request, applying the configured default
    /// when no estimate was recorded.
    pub fn hours_for(&self, request: &Request) -> f64 {
        request.estimated_hours.unwrap_or(self.default_hours)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            rates: PerTier {
                promotion: 125.0,
                low: 200.0,
                medium: 250.0,
                high: 300.0,
            },
            free_hours_per_month: 10.0,
            free_hours_start: "2025-06".to_string(),
            default_hours: 0.5,
        }
    }
}

/// Accumulated hours and gross cost for one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierCost {
    pub hours: f64,
    pub gross_cost: f64,
}

/// Free-hours allocation outcome for one tier. Only produced when the
/// free-hours policy applied to the period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierAllocation {
    /// Free hours consumed by requests in this tier.
    pub free_hours: f64,
    /// Gross cost minus this tier's free-hours savings.
    pub net_cost: f64,
}

/// The result of a cost computation for one billing period. Immutable
/// once returned; the engine allocates a fresh result on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// Per-tier accumulated hours and gross cost.
    pub tiers: PerTier<TierCost>,
    /// Sum of all four tier gross costs.
    pub gross_total_cost: f64,
    /// Free hours consumed this period (0 when the policy is off).
    pub free_hours_applied: f64,
    /// Dollar value of the consumed free hours.
    pub free_hours_savings: f64,
    /// `gross_total_cost - free_hours_savings`.
    pub net_total_cost: f64,
    /// Per-tier free-hours/net breakdown; `Some` exactly when the
    /// free-hours policy was active for the period.
    pub allocation: Option<PerTier<TierAllocation>>,
}

impl CostResult {
    /// An all-zero result, as produced for an empty request list.
    pub fn zero() -> Self {
        CostResult {
            tiers: PerTier::default(),
            gross_total_cost: 0.0,
            free_hours_applied: 0.0,
            free_hours_savings: 0.0,
            net_total_cost: 0.0,
            allocation: None,
        }
    }
}
