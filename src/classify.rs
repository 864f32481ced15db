//! Keyword classification of support-request text.
//!
//! Two pure helpers: [`categorize`] maps a free-text description to a
//! category label for grouping and display, and [`infer_urgency`]
//! guesses an urgency tier from the wording. Both are deterministic
//! keyword scans with a fixed priority order and a total fallback;
//! they never fail and have no side effects.

use crate::models::UrgencyTier;

/// Fallback category when no rule matches.
pub const GENERAL_SUPPORT: &str = "General Support";

/// Category rules, checked in priority order; the first rule with any
/// matching keyword wins. Order matters: "webhook" outranks "email"
/// so a form-notification request lands in Forms, not Email.
const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["form", "webhook"], "Forms"),
    (&["dns", "nameserver"], "DNS"),
    (&["migrat"], "Migration"),
    (&["hosting", "server"], "Hosting"),
    (&["email"], "Email"),
    (&["backup", "zip"], "Backup"),
    (&["license"], "Licensing"),
    (&["page", "content"], "Content"),
    (&["tag", "analytics"], "Analytics"),
];

/// Map a request description to a category label.
///
/// Case-insensitive substring matching; always returns a label, with
/// [`GENERAL_SUPPORT`] as the fallback for unrecognised text.
pub fn categorize(description: &str) -> &'static str {
    let text = description.to_lowercase();
    for (keywords, category) in CATEGORY_RULES {
        if keywords.iter().any(|k| text.contains(k)) {
            return category;
        }
    }
    GENERAL_SUPPORT
}

/// Wording that marks a request as urgent.
const HIGH_URGENCY_MARKERS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "today",
    "critical",
    "emergency",
    "100% by",
];

/// Wording that marks a request as low priority.
const LOW_URGENCY_MARKERS: &[&str] = &["when you can", "no rush", "whenever", "eventually"];

/// Infer an urgency tier from request wording.
///
/// High markers are checked before low markers; anything neutral is
/// Medium. `Promotion` is never inferred; promotional work is tagged
/// explicitly by the operator, not guessed from text.
pub fn infer_urgency(description: &str) -> UrgencyTier {
    let text = description.to_lowercase();
    if HIGH_URGENCY_MARKERS.iter().any(|m| text.contains(m)) {
        return UrgencyTier::High;
    }
    if LOW_URGENCY_MARKERS.iter().any(|m| text.contains(m)) {
        return UrgencyTier::Low;
    }
    UrgencyTier::Medium
}
