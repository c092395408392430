// ── Aggregation queries ──
//
// Pure reductions over a client snapshot and the current instant. The
// dashboard reads stored statuses; nothing here recomputes them.

use std::sync::Arc;

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Client, PackageType};

/// Expiry windows shown on the dashboard, in days.
pub const DEFAULT_EXPIRING_WINDOWS: [u32; 3] = [3, 7, 14];

/// Time slots of the "today" chart with the share of the day's revenue
/// attributed to each (sums to 1.00).
const HOURLY_WEIGHTS: [(&str, Decimal); 8] = [
    ("08:00", Decimal::from_parts(10, 0, 0, false, 2)),
    ("10:00", Decimal::from_parts(15, 0, 0, false, 2)),
    ("12:00", Decimal::from_parts(5, 0, 0, false, 2)),
    ("14:00", Decimal::from_parts(20, 0, 0, false, 2)),
    ("16:00", Decimal::from_parts(25, 0, 0, false, 2)),
    ("18:00", Decimal::from_parts(10, 0, 0, false, 2)),
    ("20:00", Decimal::from_parts(10, 0, 0, false, 2)),
    ("22:00", Decimal::from_parts(5, 0, 0, false, 2)),
];

/// Number of clients whose expiry lies in `(now, now + days]`.
///
/// A client expiring exactly at `now` is excluded; one expiring exactly
/// at the window edge is included. Windows reaching past the calendar's
/// end cover every future expiry.
pub fn count_expiring_within(clients: &[Arc<Client>], days: u32, now: DateTime<Utc>) -> usize {
    let horizon = now
        .checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    clients
        .iter()
        .filter(|c| {
            let expiry = c.expires_at();
            expiry > now && expiry <= horizon
        })
        .count()
}

// ── Revenue ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Sum of prices over clients stored as Active or Expiring Soon.
    pub total_revenue: Decimal,
    /// Sum of prices over clients whose subscription started today.
    pub today_revenue: Decimal,
    /// Number of clients contributing to `total_revenue`.
    pub active_count: usize,
}

pub fn revenue_summary(clients: &[Arc<Client>], now: DateTime<Utc>) -> RevenueSummary {
    let today = now.date_naive();
    let mut summary = RevenueSummary {
        total_revenue: Decimal::ZERO,
        today_revenue: Decimal::ZERO,
        active_count: 0,
    };

    for client in clients {
        if client.status.is_billable() {
            summary.total_revenue += client.price;
            summary.active_count += 1;
        }
        if client.start_date == today {
            summary.today_revenue += client.price;
        }
    }

    summary
}

/// Revenue from subscriptions started on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// Short weekday name ("Mon").
    pub label: String,
    pub amount: Decimal,
}

fn revenue_started_on(clients: &[Arc<Client>], day: NaiveDate) -> Decimal {
    clients
        .iter()
        .filter(|c| c.start_date == day)
        .map(|c| c.price)
        .sum()
}

/// The last seven days, oldest first, ending with today.
pub fn weekly_revenue(clients: &[Arc<Client>], now: DateTime<Utc>) -> Vec<DailyRevenue> {
    let today = now.date_naive();
    (0..7u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DailyRevenue {
            date,
            label: date.format("%a").to_string(),
            amount: revenue_started_on(clients, date),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyRevenue {
    pub time: &'static str,
    pub amount: Decimal,
}

/// Spread a day's revenue across the fixed chart slots.
///
/// This is a presentation estimate; no per-hour sales are recorded.
pub fn hourly_revenue(today_revenue: Decimal) -> Vec<HourlyRevenue> {
    HOURLY_WEIGHTS
        .iter()
        .map(|&(time, weight)| HourlyRevenue {
            time,
            amount: today_revenue * weight,
        })
        .collect()
}

// ── Packages ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackageDistribution {
    pub diamond: usize,
    pub lion: usize,
    pub vip: usize,
}

impl PackageDistribution {
    pub fn count(&self, package: PackageType) -> usize {
        match package {
            PackageType::Diamond => self.diamond,
            PackageType::Lion => self.lion,
            PackageType::Vip => self.vip,
        }
    }

    pub fn total(&self) -> usize {
        self.diamond + self.lion + self.vip
    }
}

pub fn package_distribution(clients: &[Arc<Client>]) -> PackageDistribution {
    let count = |p: PackageType| clients.iter().filter(|c| c.package_type == p).count();
    PackageDistribution {
        diamond: count(PackageType::Diamond),
        lion: count(PackageType::Lion),
        vip: count(PackageType::Vip),
    }
}

// ── Dashboard ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpiringWindow {
    pub days: u32,
    pub count: usize,
}

pub fn expiring_overview(
    clients: &[Arc<Client>],
    windows: &[u32],
    now: DateTime<Utc>,
) -> Vec<ExpiringWindow> {
    windows
        .iter()
        .map(|&days| ExpiringWindow {
            days,
            count: count_expiring_within(clients, days, now),
        })
        .collect()
}

/// Everything the overview screen shows, computed in one pass over a
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub generated_at: DateTime<Utc>,
    pub client_count: usize,
    pub revenue: RevenueSummary,
    pub expiring: Vec<ExpiringWindow>,
    pub packages: PackageDistribution,
    pub weekly: Vec<DailyRevenue>,
    pub hourly: Vec<HourlyRevenue>,
}

impl DashboardSummary {
    pub fn build(clients: &[Arc<Client>], windows: &[u32], now: DateTime<Utc>) -> Self {
        let revenue = revenue_summary(clients, now);
        let hourly = hourly_revenue(revenue.today_revenue);
        Self {
            generated_at: now,
            client_count: clients.len(),
            revenue,
            expiring: expiring_overview(clients, windows, now),
            packages: package_distribution(clients),
            weekly: weekly_revenue(clients, now),
            hourly,
        }
    }
}
