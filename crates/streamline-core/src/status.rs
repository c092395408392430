// ── Status resolution ──
//
// Maps an expiry instant to a lifecycle state. Day counts are taken from
// absolute elapsed milliseconds rounded up, never from calendar-day
// subtraction, so the 7-day boundary matches the dashboard exactly.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::model::SubscriptionStatus;

/// Clients expiring within this many (ceiling-rounded) days are flagged.
pub const EXPIRING_SOON_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Interpret a stored `YYYY-MM-DD` date as midnight UTC.
pub fn date_to_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days between `now` and `expiry`, rounded up.
///
/// Positive while the subscription runs, zero when expiry is exactly now,
/// negative (rounded away from zero) once it has lapsed.
pub fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = (expiry - now).num_milliseconds();
    let days = ceil_days(elapsed.unsigned_abs());
    if elapsed < 0 { -days } else { days }
}

fn ceil_days(millis: u64) -> i64 {
    let per_day = MILLIS_PER_DAY.unsigned_abs();
    i64::try_from(millis.div_ceil(per_day)).unwrap_or(i64::MAX)
}

/// Resolve the lifecycle state for an expiry instant.
///
/// Never returns [`SubscriptionStatus::Suspended`].
pub fn resolve_status(expiry: DateTime<Utc>, now: DateTime<Utc>) -> SubscriptionStatus {
    if expiry < now {
        return SubscriptionStatus::Expired;
    }

    if days_until(expiry, now) <= EXPIRING_SOON_DAYS {
        return SubscriptionStatus::ExpiringSoon;
    }

    SubscriptionStatus::Active
}

/// [`resolve_status`] for a date-only expiry.
pub fn resolve_for_date(expiry: NaiveDate, now: DateTime<Utc>) -> SubscriptionStatus {
    resolve_status(date_to_instant(expiry), now)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expiry_today_at_midnight_is_expiring_soon() {
        let now = at(2024, 1, 1, 0);
        assert_eq!(
            resolve_for_date(date(2024, 1, 1), now),
            SubscriptionStatus::ExpiringSoon
        );
        assert_eq!(days_until(date_to_instant(date(2024, 1, 1)), now), 0);
    }

    #[test]
    fn yesterday_is_expired() {
        let now = at(2024, 1, 1, 0);
        assert_eq!(
            resolve_for_date(date(2023, 12, 31), now),
            SubscriptionStatus::Expired
        );
    }

    #[test]
    fn any_past_instant_is_expired() {
        let now = at(2024, 6, 15, 12);
        for offset in [1, 60_000, 86_400_000, 400 * 86_400_000] {
            let expiry = now - Duration::milliseconds(offset);
            assert_eq!(resolve_status(expiry, now), SubscriptionStatus::Expired);
        }
    }

    #[test]
    fn exactly_seven_days_is_expiring_soon() {
        let now = at(2024, 6, 15, 12);
        let expiry = now + Duration::days(7);
        assert_eq!(resolve_status(expiry, now), SubscriptionStatus::ExpiringSoon);
    }

    #[test]
    fn one_millisecond_past_seven_days_rounds_up_to_eight() {
        let now = at(2024, 6, 15, 12);
        let expiry = now + Duration::days(7) + Duration::milliseconds(1);
        assert_eq!(days_until(expiry, now), 8);
        assert_eq!(resolve_status(expiry, now), SubscriptionStatus::Active);
    }

    #[test]
    fn partial_days_round_up() {
        let now = at(2024, 6, 15, 12);
        assert_eq!(days_until(now + Duration::hours(6), now), 1);
        assert_eq!(days_until(now + Duration::days(6) + Duration::hours(23), now), 7);
        assert_eq!(days_until(now - Duration::hours(6), now), -1);
    }

    #[test]
    fn far_future_is_active() {
        let now = at(2024, 6, 15, 12);
        assert_eq!(
            resolve_status(now + Duration::days(335), now),
            SubscriptionStatus::Active
        );
    }

    #[test]
    fn date_expiry_mid_day_now() {
        // 12:00 on the 15th; expiry on the 22nd is 6.5 days away -> 7 days.
        let now = at(2024, 6, 15, 12);
        assert_eq!(
            resolve_for_date(date(2024, 6, 22), now),
            SubscriptionStatus::ExpiringSoon
        );
        // Expiry on the 23rd is 7.5 days away -> 8 days.
        assert_eq!(
            resolve_for_date(date(2024, 6, 23), now),
            SubscriptionStatus::Active
        );
        // Midnight of the current day has already passed.
        assert_eq!(
            resolve_for_date(date(2024, 6, 15), now),
            SubscriptionStatus::Expired
        );
    }
}
