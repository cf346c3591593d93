//! Input validation for booking payloads.
//!
//! Validation is a pure function from the raw JSON body to either a
//! populated [`BookingInput`] or a [`BookingRejection`]. Presence uses
//! JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` all count as
//! missing, so `"guests": 0` is rejected just like an absent key.

use serde_json::{Map, Value};

use crate::db::BookingInput;

use super::error::ApiError;

/// Fields every create and update must carry, in reporting order
pub const REQUIRED_FIELDS: [&str; 7] = [
    "fullname", "email", "phone", "checkin", "checkout", "roomtype", "guests",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRejection {
    #[error("Invalid JSON")]
    NotAnObject,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// `guests` is present but has no integer reading, e.g. `"two"` or `2.5`
    #[error("guests must be a whole number")]
    GuestsNotWhole,
}

impl From<BookingRejection> for ApiError {
    fn from(rejection: BookingRejection) -> Self {
        match rejection {
            BookingRejection::NotAnObject => ApiError::malformed(),
            other => ApiError::validation(other.to_string()),
        }
    }
}

/// JSON truthiness
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Names of required fields that are absent or falsy
pub fn missing_fields(body: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !body.get(*field).is_some_and(is_truthy))
        .collect()
}

/// Text stored for a present field. Strings are kept verbatim, booleans
/// follow SQLite's integer encoding, anything else keeps its JSON text.
fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => i64::from(*b).to_string(),
        other => other.to_string(),
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validate a create/update body and turn it into a typed record
pub fn validate_booking(body: &Value) -> Result<BookingInput, BookingRejection> {
    let fields = body.as_object().ok_or(BookingRejection::NotAnObject)?;

    let mut missing = missing_fields(fields);

    let guests = fields.get("guests").and_then(integer_value);
    if guests == Some(0) && !missing.contains(&"guests") {
        // "0" is a truthy string but still no guests
        missing.push("guests");
    }

    if !missing.is_empty() {
        return Err(BookingRejection::MissingFields(missing));
    }

    let guests = guests.ok_or(BookingRejection::GuestsNotWhole)?;
    let text = |name: &str| fields.get(name).map(text_value).unwrap_or_default();

    Ok(BookingInput {
        fullname: text("fullname"),
        email: text("email"),
        phone: text("phone"),
        checkin: text("checkin"),
        checkout: text("checkout"),
        roomtype: text("roomtype"),
        guests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "fullname": "Jane Doe",
            "email": "jane@x.com",
            "phone": "555-1111",
            "checkin": "2024-06-01",
            "checkout": "2024-06-05",
            "roomtype": "deluxe",
            "guests": 2
        })
    }

    #[test]
    fn test_valid_body() {
        let input = validate_booking(&valid_body()).unwrap();
        assert_eq!(input.fullname, "Jane Doe");
        assert_eq!(input.checkout, "2024-06-05");
        assert_eq!(input.guests, 2);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([0])));
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert_eq!(validate_booking(&json!([1, 2])), Err(BookingRejection::NotAnObject));
        assert_eq!(validate_booking(&json!("text")), Err(BookingRejection::NotAnObject));
        assert_eq!(validate_booking(&Value::Null), Err(BookingRejection::NotAnObject));
    }

    #[test]
    fn test_empty_object_lists_every_field() {
        let err = validate_booking(&json!({})).unwrap_err();
        assert_eq!(err, BookingRejection::MissingFields(REQUIRED_FIELDS.to_vec()));
        assert_eq!(
            err.to_string(),
            "Missing required fields: fullname, email, phone, checkin, checkout, roomtype, guests"
        );
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let mut body = valid_body();
        let obj = body.as_object_mut().unwrap();
        obj.remove("roomtype");
        obj.insert("email".to_string(), json!(""));
        obj.insert("phone".to_string(), Value::Null);

        let err = validate_booking(&body).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: email, phone, roomtype");
    }

    #[test]
    fn test_zero_guests_is_missing() {
        let mut body = valid_body();
        body["guests"] = json!(0);
        assert_eq!(
            validate_booking(&body),
            Err(BookingRejection::MissingFields(vec!["guests"]))
        );

        body["guests"] = json!("0");
        assert_eq!(
            validate_booking(&body),
            Err(BookingRejection::MissingFields(vec!["guests"]))
        );
    }

    #[test]
    fn test_guests_accepts_numeric_strings() {
        let mut body = valid_body();
        body["guests"] = json!(" 4 ");
        assert_eq!(validate_booking(&body).unwrap().guests, 4);

        body["guests"] = json!(3.0);
        assert_eq!(validate_booking(&body).unwrap().guests, 3);
    }

    #[test]
    fn test_guests_booleans_use_integer_encoding() {
        let mut body = valid_body();
        body["guests"] = json!(true);
        assert_eq!(validate_booking(&body).unwrap().guests, 1);
    }

    #[test]
    fn test_guests_without_integer_reading_is_rejected() {
        for guests in [json!("two"), json!(2.5), json!([2]), json!({"adults": 2})] {
            let mut body = valid_body();
            body["guests"] = guests.clone();
            let err = validate_booking(&body).unwrap_err();
            assert_eq!(err, BookingRejection::GuestsNotWhole, "guests {}", guests);
            assert_eq!(err.to_string(), "guests must be a whole number");
        }
    }

    #[test]
    fn test_text_fields_accept_any_truthy_value() {
        let mut body = valid_body();
        body["phone"] = json!(5551111);
        body["roomtype"] = json!(true);
        body["fullname"] = json!({"first": "Jane"});
        body["email"] = json!(["jane@x.com"]);

        let input = validate_booking(&body).unwrap();
        assert_eq!(input.phone, "5551111");
        assert_eq!(input.roomtype, "1");
        assert_eq!(input.fullname, r#"{"first":"Jane"}"#);
        assert_eq!(input.email, r#"["jane@x.com"]"#);
    }

    #[test]
    fn test_missing_takes_precedence_over_guests_type() {
        let mut body = valid_body();
        body["guests"] = json!("many");
        body["email"] = json!("");

        assert_eq!(
            validate_booking(&body),
            Err(BookingRejection::MissingFields(vec!["email"]))
        );
    }

    #[test]
    fn test_rejection_maps_to_api_error() {
        use crate::api::error::ErrorCode;

        let err: ApiError = BookingRejection::NotAnObject.into();
        assert_eq!(err.code(), ErrorCode::MalformedRequest);

        let err: ApiError = BookingRejection::MissingFields(vec!["email"]).into();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.message(), "Missing required fields: email");

        let err: ApiError = BookingRejection::GuestsNotWhole.into();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }
}
