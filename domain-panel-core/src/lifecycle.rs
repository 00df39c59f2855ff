//! Domain lifecycle classification.
//!
//! Derives the status label and the single recommended row action from a
//! domain's registrar flags and its `MM/DD/YYYY` expiry date. Everything here
//! is pure: the current time is always passed in.
//!
//! # Day boundaries
//!
//! `days_left` measures from `now` (time of day included) to midnight of the
//! expiry date in `now`'s offset, rounded up. The registrar's own timezone is
//! not known, so around midnight the result can differ by one day from what
//! the registrar considers "today".

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use domain_panel_api::Domain;

/// Days before expiry during which renewing is recommended (inclusive).
pub const RENEWAL_WINDOW_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Status label shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainStatusDisplay {
    Expired,
    Locked,
    Active,
}

impl DomainStatusDisplay {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::Locked => "Locked",
            Self::Active => "Active",
        }
    }
}

impl fmt::Display for DomainStatusDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action offered on a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainListAction {
    Reactivate,
    Renew,
    Details,
}

impl DomainListAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reactivate => "reactivate",
            Self::Renew => "renew",
            Self::Details => "details",
        }
    }
}

impl fmt::Display for DomainListAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a listing row needs, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainClassification {
    pub status: DomainStatusDisplay,
    pub action: DomainListAction,
    /// `None` when `expires` cannot be parsed.
    pub days_left: Option<i64>,
}

/// Expired wins over locked.
pub fn status_display(domain: &Domain) -> DomainStatusDisplay {
    if domain.is_expired {
        DomainStatusDisplay::Expired
    } else if domain.is_locked {
        DomainStatusDisplay::Locked
    } else {
        DomainStatusDisplay::Active
    }
}

/// Parse a registrar `MM/DD/YYYY` date.
///
/// Exactly three `/`-separated numeric parts are required. Dates that do not
/// exist on the calendar (`02/30/2024`, `13/01/2024`) are rejected instead of
/// being rolled over into the next month or year.
pub fn parse_expires(expires: &str) -> Option<NaiveDate> {
    let mut parts = expires.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    NaiveDate::from_ymd_opt(number(year)?, number(month)?, number(day)?)
}

fn number<T: std::str::FromStr>(part: &str) -> Option<T> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Whole days from `now` until `expiry`, rounded up.
///
/// Negative once the expiry date is in the past. See the module docs for the
/// day boundary caveat.
pub fn days_left(expiry: NaiveDate, now: DateTime<FixedOffset>) -> Option<i64> {
    let midnight = expiry.and_hms_opt(0, 0, 0)?;
    let expiry_at = now.offset().from_local_datetime(&midnight).single()?;
    let millis = (expiry_at - now).num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    Some(if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    })
}

fn action_for(domain: &Domain, days: Option<i64>) -> DomainListAction {
    if domain.is_expired {
        return DomainListAction::Reactivate;
    }
    match days {
        Some(d) if (0..=RENEWAL_WINDOW_DAYS).contains(&d) => DomainListAction::Renew,
        _ => DomainListAction::Details,
    }
}

/// Recommended row action.
///
/// Expired domains are reactivated. Otherwise renewing is offered from
/// [`RENEWAL_WINDOW_DAYS`] days before expiry until the expiry date itself; an
/// unparseable date never triggers an urgent action.
pub fn list_action(domain: &Domain, now: DateTime<FixedOffset>) -> DomainListAction {
    let days = parse_expires(&domain.expires).and_then(|d| days_left(d, now));
    action_for(domain, days)
}

pub fn classify(domain: &Domain, now: DateTime<FixedOffset>) -> DomainClassification {
    let days = parse_expires(&domain.expires).and_then(|d| days_left(d, now));
    DomainClassification {
        status: status_display(domain),
        action: action_for(domain, days),
        days_left: days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn domain(expires: &str, is_expired: bool, is_locked: bool) -> Domain {
        let mut d = Domain::new("1", "example.com", expires);
        d.is_expired = is_expired;
        d.is_locked = is_locked;
        d
    }

    // ---- status_display ----

    #[test]
    fn expired_beats_locked() {
        for locked in [true, false] {
            let d = domain("01/01/2020", true, locked);
            assert_eq!(status_display(&d), DomainStatusDisplay::Expired);
            assert_eq!(status_display(&d).to_string(), "Expired");
        }
    }

    #[test]
    fn locked_and_active() {
        assert_eq!(
            status_display(&domain("", false, true)),
            DomainStatusDisplay::Locked
        );
        assert_eq!(
            status_display(&domain("", false, false)).to_string(),
            "Active"
        );
    }

    // ---- parse_expires ----

    #[test]
    fn parses_month_first() {
        assert_eq!(
            parse_expires("03/15/2025"),
            NaiveDate::from_ymd_opt(2025, 3, 15)
        );
        assert_eq!(parse_expires("3/5/2025"), NaiveDate::from_ymd_opt(2025, 3, 5));
    }

    #[test]
    fn rejects_overflowing_dates() {
        assert_eq!(parse_expires("13/40/2024"), None);
        assert_eq!(parse_expires("02/30/2024"), None);
        assert_eq!(parse_expires("00/10/2024"), None);
        assert_eq!(parse_expires("02/29/2023"), None);
        assert!(parse_expires("02/29/2024").is_some());
    }

    #[test]
    fn rejects_malformed_strings() {
        for s in ["", "2024-03-15", "03/15", "03/15/2024/1", "aa/bb/cccc", "03/ 15/2024", "-1/15/2024"] {
            assert_eq!(parse_expires(s), None, "{s:?} should not parse");
        }
    }

    // ---- list_action ----

    #[test]
    fn expired_always_reactivates() {
        let now = at("2025-03-01T10:00:00+00:00");
        for expires in ["", "garbage", "03/03/2025", "01/01/2030"] {
            for locked in [true, false] {
                let d = domain(expires, true, locked);
                assert_eq!(list_action(&d, now), DomainListAction::Reactivate);
            }
        }
    }

    #[test]
    fn renew_window_is_inclusive() {
        let now = at("2025-03-01T10:00:00+00:00");
        assert_eq!(
            list_action(&domain("03/08/2025", false, false), now),
            DomainListAction::Renew
        );
        assert_eq!(
            list_action(&domain("03/09/2025", false, false), now),
            DomainListAction::Details
        );
    }

    #[test]
    fn expiring_today_renews() {
        let now = at("2025-03-01T18:45:00+00:00");
        let d = domain("03/01/2025", false, false);
        assert_eq!(classify(&d, now).days_left, Some(0));
        assert_eq!(list_action(&d, now), DomainListAction::Renew);
    }

    #[test]
    fn already_past_but_not_flagged_is_details() {
        let now = at("2025-03-01T10:00:00+00:00");
        let d = domain("02/27/2025", false, false);
        assert_eq!(classify(&d, now).days_left, Some(-2));
        assert_eq!(list_action(&d, now), DomainListAction::Details);
    }

    #[test]
    fn unparseable_expiry_is_details() {
        let now = at("2025-03-01T10:00:00+00:00");
        for expires in ["13/40/2024", ""] {
            let c = classify(&domain(expires, false, false), now);
            assert_eq!(c.action, DomainListAction::Details);
            assert_eq!(c.days_left, None);
        }
    }

    #[test]
    fn locked_domains_still_get_renew() {
        let now = at("2025-03-01T10:00:00+00:00");
        let c = classify(&domain("03/05/2025", false, true), now);
        assert_eq!(c.status, DomainStatusDisplay::Locked);
        assert_eq!(c.action, DomainListAction::Renew);
    }

    // ---- day boundary behaviour ----

    #[test]
    fn exactly_midnight_counts_full_days() {
        let now = at("2025-03-01T00:00:00+00:00");
        let d = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(days_left(d, now), Some(8));
        let now = at("2025-03-01T00:00:00.001+00:00");
        assert_eq!(days_left(d, now), Some(8));
    }

    #[test]
    fn offset_decides_which_day_it_is() {
        // Same instant: still Feb 28 in UTC-5, already Mar 1 in UTC+7.
        let expiry = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let west = at("2025-02-28T22:00:00-05:00");
        let east = west.with_timezone(&FixedOffset::east_opt(7 * 3600).unwrap());
        assert_eq!(days_left(expiry, west), Some(8));
        assert_eq!(days_left(expiry, east), Some(7));

        let d = domain("03/08/2025", false, false);
        assert_eq!(list_action(&d, west), DomainListAction::Details);
        assert_eq!(list_action(&d, east), DomainListAction::Renew);
    }

    #[test]
    fn classification_is_deterministic() {
        let now = at("2025-03-01T10:00:00+07:00");
        let d = domain("03/04/2025", false, false);
        assert_eq!(classify(&d, now), classify(&d, now));
    }

    #[test]
    fn action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DomainListAction::Reactivate).unwrap(),
            "\"reactivate\""
        );
    }
}
