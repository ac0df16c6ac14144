use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One customer's service reservation. Created unauthenticated through the
/// public booking form; `called` and `status` change only through the
/// privileged mutation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub plan_type: String,
    pub plan_price: Decimal,
    /// Short human-quotable code for unauthenticated status lookup.
    /// Unique, immutable after creation.
    pub tracking_code: String,
    pub called: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Generate a tracking code: "NR" followed by six digits. Derived from a
    /// v4 UUID so no extra randomness source is needed.
    pub fn generate_tracking_code() -> String {
        let n = Uuid::new_v4().as_u128() % 1_000_000;
        format!("NR{:06}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_code_shape() {
        for _ in 0..50 {
            let code = Booking::generate_tracking_code();
            assert_eq!(code.len(), 8);
            assert!(code.starts_with("NR"));
            assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
