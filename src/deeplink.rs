use qrcode::{render::svg, QrCode};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::Swosh;

pub const SWISH_PAYMENT_PREFIX: &str = "swish://payment?data=";
const QR_MIN_DIMENSION: u32 = 240;

/// Builds the Swish app link for a stored request.
pub fn payment_uri(swosh: &Swosh) -> String {
    format!(
        "{SWISH_PAYMENT_PREFIX}{}",
        urlencoding::encode(&payment_data(swosh).to_string())
    )
}

pub fn payment_data(swosh: &Swosh) -> Value {
    let mut data = json!({
        "version": 1,
        "payee": { "value": swosh.payee },
        "amount": { "value": amount_value(swosh.amount) },
    });
    if let Some(description) = &swosh.description {
        data["message"] = json!({ "value": description, "editable": false });
    }
    data
}

// Whole amounts go out as integers so the app shows "100", not "100.0".
fn amount_value(amount: f64) -> Value {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        json!(amount as i64)
    } else {
        json!(amount)
    }
}

/// Renders `uri` as an SVG QR code.
pub fn qr_svg(uri: &str) -> Result<String, AppError> {
    let code = QrCode::new(uri.as_bytes())
        .map_err(|err| AppError::Internal(format!("qr encoding failed: {err}")))?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
        .quiet_zone(true)
        .build())
}
