use chrono::{DateTime, Utc};

/// A stored payment request.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Swosh {
    pub id: String,
    pub payee: String,
    pub amount: f64,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A request that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSwosh {
    pub payee: String,
    pub amount: f64,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Swosh {
    pub fn new(id: String, new: &NewSwosh, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            payee: new.payee.clone(),
            amount: new.amount,
            description: new.description.clone(),
            expires_at: new.expires_at,
            created_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}
