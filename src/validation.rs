use chrono::{DateTime, TimeDelta, Utc};
use phonenumber::{country, metadata::DATABASE, Mode, Type};
use tracing::debug;

use crate::errors::AppError;
use crate::models::{requests::CreateSwoshRequest, NewSwosh};

pub const MIN_AMOUNT: f64 = 1.0;
pub const MAX_DESCRIPTION_CHARS: usize = 50;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const AMOUNT_TOO_LOW: &str = "Amount must be 1 or more";
pub const DESCRIPTION_TOO_LONG: &str = "Description can't be longer than 50 characters";
pub const INVALID_PHONE: &str = "Invalid phone number";
pub const NOT_MOBILE: &str = "Phone number must be a mobile number";
pub const FOREIGN_NUMBER: &str = "Phone number must belong to the service region";
pub const INVALID_EXPIRY: &str = "Expiry must be at least 1 second";
pub const EXPIRY_OUT_OF_RANGE: &str = "Expiry is too far in the future";

/// Checks a create request field by field and returns the first failure.
pub fn validate(
    request: &CreateSwoshRequest,
    region: country::Id,
    now: DateTime<Utc>,
) -> Result<NewSwosh, AppError> {
    let (Some(payee), Some(amount)) = (request.payee.as_deref(), request.amount) else {
        return Err(AppError::validation(MISSING_FIELDS));
    };

    if !amount.is_finite() || amount < MIN_AMOUNT {
        return Err(AppError::validation(AMOUNT_TOO_LOW));
    }

    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_CHARS) {
        return Err(AppError::validation(DESCRIPTION_TOO_LONG));
    }

    let payee = normalize_payee(payee, region)?;

    let expires_at = match request.expire_after_seconds {
        None => None,
        Some(secs) if secs < 1 => return Err(AppError::validation(INVALID_EXPIRY)),
        Some(secs) => {
            let after = TimeDelta::try_seconds(secs)
                .ok_or_else(|| AppError::validation(EXPIRY_OUT_OF_RANGE))?;
            Some(
                now.checked_add_signed(after)
                    .ok_or_else(|| AppError::validation(EXPIRY_OUT_OF_RANGE))?,
            )
        }
    };

    Ok(NewSwosh {
        payee,
        amount,
        description: description.map(str::to_owned),
        expires_at,
    })
}

/// Swish business numbers are `123` followed by seven digits.
pub fn is_provider_number(input: &str) -> bool {
    input.len() == 10 && input.starts_with("123") && input.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts a mobile number in `region`, written nationally or with the
/// region's country code, and returns it as national digits, e.g. `+46 70-123 45 67` becomes `0701234567`.
pub fn normalize_payee(input: &str, region: country::Id) -> Result<String, AppError> {
    let input = input.trim();
    if is_provider_number(input) {
        return Ok(input.to_owned());
    }

    let number = phonenumber::parse(Some(region), input).map_err(|err| {
        debug!(error = %err, "unparseable phone number");
        AppError::validation(INVALID_PHONE)
    })?;
    if !phonenumber::is_valid(&number) {
        return Err(AppError::validation(INVALID_PHONE));
    }

    // National formatting drops the country code, so a foreign number would
    // come out looking like a local one.
    let number_region = number.country().id();
    if number_region != Some(region) {
        debug!(region = ?number_region, "rejecting number from another region");
        return Err(AppError::validation(FOREIGN_NUMBER));
    }

    match number.number_type(&DATABASE) {
        Type::Mobile | Type::FixedLineOrMobile => {}
        other => {
            debug!(number_type = ?other, "rejecting non-mobile number");
            return Err(AppError::validation(NOT_MOBILE));
        }
    }

    let national = number.format().mode(Mode::National).to_string();
    Ok(national.chars().filter(char::is_ascii_digit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payee: Option<&str>, amount: Option<f64>) -> CreateSwoshRequest {
        CreateSwoshRequest {
            payee: payee.map(str::to_owned),
            amount,
            ..Default::default()
        }
    }

    fn reason(result: Result<NewSwosh, AppError>) -> String {
        match result {
            Err(AppError::Validation(reason)) => reason,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_swedish_mobile() {
        let new = validate(&request(Some("070-123 45 67"), Some(100.0)), country::Id::SE, Utc::now())
            .unwrap();
        assert_eq!(new.payee, "0701234567");
        assert_eq!(new.amount, 100.0);
        assert_eq!(new.description, None);
        assert_eq!(new.expires_at, None);
    }

    #[test]
    fn accepts_international_form() {
        let payee = normalize_payee("+46701234567", country::Id::SE).unwrap();
        assert_eq!(payee, "0701234567");
    }

    #[test]
    fn keeps_provider_numbers_verbatim() {
        let payee = normalize_payee("1231181189", country::Id::SE).unwrap();
        assert_eq!(payee, "1231181189");
        assert!(!is_provider_number("123118118"));
        assert!(!is_provider_number("12311811a9"));
    }

    #[test]
    fn missing_fields_come_first() {
        let mut req = request(None, Some(0.0));
        req.description = Some("x".repeat(80));
        assert_eq!(reason(validate(&req, country::Id::SE, Utc::now())), MISSING_FIELDS);
        assert_eq!(
            reason(validate(&request(Some("0701234567"), None), country::Id::SE, Utc::now())),
            MISSING_FIELDS
        );
    }

    #[test]
    fn amount_below_one_is_rejected() {
        for amount in [0.99, 0.0, -5.0, f64::NAN, f64::INFINITY] {
            let req = request(Some("not a number"), Some(amount));
            assert_eq!(reason(validate(&req, country::Id::SE, Utc::now())), AMOUNT_TOO_LOW);
        }
        let req = request(Some("0701234567"), Some(1.0));
        assert!(validate(&req, country::Id::SE, Utc::now()).is_ok());
    }

    #[test]
    fn description_is_limited_to_50_chars() {
        let mut req = request(Some("garbage"), Some(10.0));
        req.description = Some("å".repeat(51));
        assert_eq!(reason(validate(&req, country::Id::SE, Utc::now())), DESCRIPTION_TOO_LONG);

        let mut req = request(Some("0701234567"), Some(10.0));
        req.description = Some("ä".repeat(50));
        let new = validate(&req, country::Id::SE, Utc::now()).unwrap();
        assert_eq!(new.description.unwrap().chars().count(), 50);
    }

    #[test]
    fn blank_description_is_dropped() {
        let mut req = request(Some("0701234567"), Some(10.0));
        req.description = Some("   ".into());
        assert_eq!(validate(&req, country::Id::SE, Utc::now()).unwrap().description, None);
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let req = request(Some("hello"), Some(10.0));
        assert_eq!(reason(validate(&req, country::Id::SE, Utc::now())), INVALID_PHONE);
    }

    #[test]
    fn rejects_landline_numbers() {
        for payee in ["08-123 456 78", "031-123 45 67"] {
            let req = request(Some(payee), Some(10.0));
            assert_eq!(reason(validate(&req, country::Id::SE, Utc::now())), NOT_MOBILE, "{payee}");
        }
    }

    #[test]
    fn rejects_mobiles_from_other_regions() {
        for payee in ["+358401234567", "+4791234567", "+447400123456"] {
            let err = normalize_payee(payee, country::Id::SE).unwrap_err();
            assert!(
                matches!(&err, AppError::Validation(r) if r == FOREIGN_NUMBER),
                "{payee}: {err:?}"
            );
        }
        assert_eq!(normalize_payee("+4791234567", country::Id::NO).unwrap(), "91234567");
    }

    #[test]
    fn padded_description_is_trimmed_before_length_check() {
        let text = "d".repeat(49);
        let mut req = request(Some("0701234567"), Some(10.0));
        req.description = Some(format!("   {text}   "));
        let new = validate(&req, country::Id::SE, Utc::now()).unwrap();
        assert_eq!(new.description.as_deref(), Some(text.as_str()));

        req.description = Some(format!("  {}  ", "d".repeat(51)));
        assert_eq!(reason(validate(&req, country::Id::SE, Utc::now())), DESCRIPTION_TOO_LONG);
    }

    #[test]
    fn expiry_is_relative_to_now() {
        let now = Utc::now();
        let mut req = request(Some("0701234567"), Some(10.0));
        req.expire_after_seconds = Some(3600);
        let new = validate(&req, country::Id::SE, now).unwrap();
        assert_eq!(new.expires_at, Some(now + TimeDelta::seconds(3600)));

        req.expire_after_seconds = Some(0);
        assert_eq!(reason(validate(&req, country::Id::SE, now)), INVALID_EXPIRY);

        req.expire_after_seconds = Some(i64::MAX);
        assert_eq!(reason(validate(&req, country::Id::SE, now)), EXPIRY_OUT_OF_RANGE);
    }
}
