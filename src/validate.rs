use axum::{extract::rejection::JsonRejection, Json};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use uuid::Uuid;

use crate::error::AppError;

/// Parses a path identifier, naming the field on failure.
pub(crate) fn parse_id(field: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| {
        warn!(field, value = raw, "invalid uuid");
        AppError::Validation(format!("{field}: invalid uuid"))
    })
}

/// Unwraps a JSON body, turning serde's complaint (which names the field)
/// into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let message = rejection.body_text();
            warn!(%message, "invalid request body");
            Err(AppError::Validation(message))
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS`. Shape only; calendar validity is not checked.
pub(crate) fn is_valid_date_time(value: &str) -> bool {
    lazy_static! {
        static ref DATE_TIME_RE: Regex =
            Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}$").unwrap();
    }
    DATE_TIME_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fixed_format() {
        assert!(is_valid_date_time("2023-04-07 12:58:46"));
        assert!(is_valid_date_time("1999-12-31 23:59:59"));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(!is_valid_date_time("2023-04-07T12:58:46"));
        assert!(!is_valid_date_time("2023-4-7 12:58:46"));
        assert!(!is_valid_date_time("2023-04-07 12:58"));
        assert!(!is_valid_date_time("2023-04-07 12:58:46Z"));
        assert!(!is_valid_date_time(""));
    }

    #[test]
    fn parse_id_names_the_field() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("userId", &id.to_string()).unwrap(), id);

        let err = parse_id("mealId", "nope").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.as_str() == "mealId: invalid uuid"));
    }
}
