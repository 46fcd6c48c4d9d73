use serde::Deserialize;

/// Body of `POST /api/create`. Every field is optional at this layer so the
/// validator can report missing fields with a reason instead of a serde error.
#[derive(Deserialize, Debug, Default)]
pub struct CreateSwoshRequest {
    pub payee: Option<String>,
    pub amount: Option<f64>,
    #[serde(alias = "message")]
    pub description: Option<String>,
    pub expire_after_seconds: Option<i64>,
}
