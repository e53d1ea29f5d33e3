//! Demo records.

use serde_json::{json, Value};

const COUNTRIES: [&str; 4] = ["Kenya", "Ghana", "Nigeria", "Uganda"];

/// `count` financial institutions with nested country records.
pub fn institutions(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            let country = COUNTRIES[(i - 1) % COUNTRIES.len()];
            json!({
                "id": format!("inst-{i:03}"),
                "code": format!("FI{i:03}"),
                "name": format!("Institution {i:02}"),
                "active": i % 3 != 0,
                "amount": i * 12_500,
                "country": { "name": country, "code": country[..2].to_uppercase() },
            })
        })
        .collect()
}
