use chrono::{DateTime, Utc};
use ventures_lib::aggregate::total;
use ventures_lib::format::format_currency;

use super::DashboardData;

/// A headline number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
}

impl Kpi {
    fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

/// Computes the KPI cards. Events without a start date never count as
/// upcoming.
pub fn compute_kpis(data: &DashboardData, now: DateTime<Utc>) -> Vec<Kpi> {
    let upcoming = data
        .events
        .iter()
        .filter(|e| e.starts_at.is_some_and(|start| start >= now))
        .count();
    let open_inquiries = data.inquiries.iter().filter(|i| i.status.is_open()).count();
    let active = data
        .engagements
        .iter()
        .filter(|e| e.stage.is_active())
        .count();
    let committed = total(&data.funding, |f| f.committed);

    vec![
        Kpi::new("Events", data.events.len()),
        Kpi::new("Upcoming events", upcoming),
        Kpi::new("Registrations", data.registrations.len()),
        Kpi::new("Open inquiries", open_inquiries),
        Kpi::new("Active engagements", active),
        Kpi::new("Committed funding", format_currency(Some(committed))),
    ]
}
