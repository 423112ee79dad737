//! Demo data for local runs.
//!
//! Generates a reproducible mix of users, products, orders, settings and
//! daily statistics. The same seed and base time always yield the same set.

use chrono::{DateTime, Duration, Utc};
use fastrand::Rng;
use serde_json::{json, Value};

use super::Entry;

const FIRST_NAMES: [&str; 10] = [
    "John", "Jane", "Bob", "Alice", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];
const PRODUCTS: [(&str, f64); 10] = [
    ("Laptop", 999.99),
    ("Smartphone", 699.99),
    ("Headphones", 199.99),
    ("Tablet", 499.99),
    ("Smartwatch", 299.99),
    ("Camera", 799.99),
    ("Printer", 249.99),
    ("Monitor", 349.99),
    ("Keyboard", 129.99),
    ("Mouse", 49.99),
];
const USER_STATUSES: [&str; 4] = ["active", "inactive", "pending", "suspended"];
const ORDER_STATUSES: [&str; 4] = ["pending", "completed", "cancelled", "shipped"];
const PAYMENT_METHODS: [&str; 5] = ["credit_card", "debit_card", "paypal", "bank_transfer", "crypto"];
const CITIES: [(&str, &str); 5] = [
    ("New York", "NY"),
    ("Los Angeles", "CA"),
    ("Chicago", "IL"),
    ("Houston", "TX"),
    ("Phoenix", "AZ"),
];

pub const USER_COUNT: usize = 300;
pub const PRODUCT_COUNT: usize = 400;
pub const ORDER_COUNT: usize = 250;
pub const SETTINGS_COUNT: usize = 30;
pub const DAILY_STATS_COUNT: usize = 20;

/// Total number of entries produced by [`demo_entries`].
pub const DEMO_ENTRY_COUNT: usize =
    USER_COUNT + PRODUCT_COUNT + ORDER_COUNT + SETTINGS_COUNT + DAILY_STATS_COUNT;

// == Demo Entries ==
/// Builds the demo data set relative to `now`.
pub fn demo_entries(seed: u64, now: DateTime<Utc>) -> Vec<Entry> {
    let mut rng = Rng::with_seed(seed);
    let mut entries = Vec::with_capacity(DEMO_ENTRY_COUNT);

    for i in 1..=USER_COUNT {
        entries.push(Entry::new(format!("user:{i}"), user(&mut rng, i, now)));
    }

    let mut prices = Vec::with_capacity(PRODUCT_COUNT);
    for i in 1..=PRODUCT_COUNT {
        let (name, base_price) = pick(&mut rng, &PRODUCTS);
        let price = round2(base_price * (0.8 + rng.f64() * 0.4));
        prices.push(price);
        entries.push(Entry::new(
            format!("product:{i}"),
            json!({
                "name": format!("{name} {i}"),
                "price": price,
                "stock": rng.u32(0..100),
                "category": "Electronics",
                "rating": round1(rng.f64() * 5.0),
                "reviews": rng.u32(0..1000),
                "inStock": rng.f64() > 0.2,
                "description": format!("High-quality {} with amazing features", name.to_lowercase()),
            }),
        ));
    }

    for i in 1..=ORDER_COUNT {
        entries.push(Entry::new(
            format!("order:{i}"),
            order(&mut rng, &prices, now),
        ));
    }

    for i in 1..=SETTINGS_COUNT {
        entries.push(Entry::new(
            format!("settings:{i}"),
            json!({
                "name": format!("Setting {i}"),
                "value": rng.bool(),
                "lastModified": past(&mut rng, now).to_rfc3339(),
                "modifiedBy": format!("user:{}", rng.usize(1..=USER_COUNT)),
                "category": pick(&mut rng, &["system", "user", "security", "notification"]),
            }),
        ));
    }

    for i in 1..=DAILY_STATS_COUNT {
        let date = now - Duration::days(i as i64);
        entries.push(Entry::new(
            format!("stats:daily:{i}"),
            json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "visitors": rng.u32(1000..6000),
                "sales": rng.u32(10..110),
                "revenue": round2(rng.f64() * 10_000.0),
                "newUsers": rng.u32(0..50),
                "activeUsers": rng.u32(100..300),
                "peakHour": rng.u8(0..24),
            }),
        ));
    }

    entries
}

fn user(rng: &mut Rng, i: usize, now: DateTime<Utc>) -> Value {
    json!({
        "name": format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES)),
        "email": format!("user{i}@example.com"),
        "age": rng.u8(18..68),
        "status": pick(rng, &USER_STATUSES),
        "createdAt": past(rng, now).to_rfc3339(),
        "preferences": {
            "newsletter": rng.bool(),
            "theme": if rng.bool() { "dark" } else { "light" },
            "language": if rng.bool() { "en" } else { "es" },
        },
    })
}

fn order(rng: &mut Rng, prices: &[f64], now: DateTime<Utc>) -> Value {
    let mut total = 0.0;
    let products: Vec<Value> = (0..rng.usize(1..=5))
        .map(|_| {
            let product = rng.usize(0..prices.len());
            let quantity = rng.u32(1..=3);
            total += prices[product] * f64::from(quantity);
            json!({ "productId": format!("product:{}", product + 1), "quantity": quantity })
        })
        .collect();

    let created = past(rng, now);
    let (city, state) = pick(rng, &CITIES);
    json!({
        "userId": format!("user:{}", rng.usize(1..=USER_COUNT)),
        "products": products,
        "total": round2(total),
        "status": pick(rng, &ORDER_STATUSES),
        "paymentMethod": pick(rng, &PAYMENT_METHODS),
        "createdAt": created.to_rfc3339(),
        "shippingAddress": {
            "street": format!("{} Main St", rng.u32(1..=1000)),
            "city": city,
            "state": state,
            "zipCode": format!("{}", rng.u32(10_000..100_000)),
        },
        "estimatedDelivery": (created + Duration::days(7)).to_rfc3339(),
    })
}

fn pick<T: Copy>(rng: &mut Rng, items: &[T]) -> T {
    items[rng.usize(0..items.len())]
}

/// A timestamp up to ~115 days before `now`.
fn past(rng: &mut Rng, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::milliseconds(rng.i64(0..10_000_000_000))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn base_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_demo_entry_count_and_unique_keys() {
        let entries = demo_entries(7, base_time());
        assert_eq!(entries.len(), DEMO_ENTRY_COUNT);

        let keys: HashSet<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys.len(), DEMO_ENTRY_COUNT);
    }

    #[test]
    fn test_demo_entries_are_reproducible() {
        assert_eq!(demo_entries(42, base_time()), demo_entries(42, base_time()));
        assert_ne!(demo_entries(1, base_time()), demo_entries(2, base_time()));
    }

    #[test]
    fn test_daily_stats_dates() {
        let entries = demo_entries(3, base_time());
        let first = entries
            .iter()
            .find(|e| e.key == "stats:daily:1")
            .unwrap();
        assert_eq!(first.value["date"], "2024-05-31");
    }
}
