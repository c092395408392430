//! Demo records for a fresh installation.
//!
//! Dates are relative to the UTC day of `now`, so the three clients
//! always land in the three status bands.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::model::{
    Client, ClientId, IptvApp, MacAddress, PackageType, SubscriptionStatus,
};

fn offset(today: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        today.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(today)
}

/// One expiring-soon IBO client, one active client, one expired client.
pub fn demo_clients(now: DateTime<Utc>) -> Vec<Client> {
    let today = now.date_naive();

    vec![
        Client {
            id: ClientId::from("1"),
            full_name: "John Smith".into(),
            email: "john@example.com".into(),
            phone: "+1 234 567 890".into(),
            start_date: offset(today, -180),
            expiry_date: offset(today, 5),
            duration_months: 12,
            package_type: PackageType::Vip,
            iptv_app: IptvApp::IboPlayer,
            status: SubscriptionStatus::ExpiringSoon,
            price: Decimal::new(4999, 2),
            mac_address: Some(MacAddress::new("00:1A:2B:3C:4D:5E")),
            device_key: Some("123456".into()),
        },
        Client {
            id: ClientId::from("2"),
            full_name: "Maria Garcia".into(),
            email: "maria@example.com".into(),
            phone: "+34 600 000 000".into(),
            start_date: offset(today, -30),
            expiry_date: offset(today, 335),
            duration_months: 12,
            package_type: PackageType::Diamond,
            iptv_app: IptvApp::SmartIptv,
            status: SubscriptionStatus::Active,
            price: Decimal::new(3999, 2),
            mac_address: None,
            device_key: None,
        },
        Client {
            id: ClientId::from("3"),
            full_name: "Robert Wilson".into(),
            email: "robert@example.com".into(),
            phone: "+44 7700 900000".into(),
            start_date: offset(today, -400),
            expiry_date: offset(today, -35),
            duration_months: 12,
            package_type: PackageType::Lion,
            iptv_app: IptvApp::TiviMate,
            status: SubscriptionStatus::Expired,
            price: Decimal::new(2999, 2),
            mac_address: None,
            device_key: None,
        },
    ]
}
