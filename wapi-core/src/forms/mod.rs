//! Modal form state and submit validation.
//!
//! Every form holds what the operator typed, as raw strings for text inputs
//! and typed values for selects. Submitting validates the required fields and
//! then builds either a new entity or a patch for an existing one.

pub mod agency;
pub mod agent;
pub mod campaign;
pub mod catalogue;
pub mod chat_agent;
pub mod contact;
pub mod integration;
pub mod reply_bot;

pub use agency::AgencyClientForm;
pub use agent::AgentForm;
pub use campaign::CampaignForm;
pub use catalogue::{CatalogueItemForm, OrderForm};
pub use chat_agent::ChatAgentForm;
pub use contact::{ContactForm, ContactLabelForm};
pub use integration::IntegrationConfigForm;
pub use reply_bot::ReplyBotForm;

use chrono::NaiveDate;

use crate::Error;
use wapi_common::traits::Entity;

pub trait EntityForm {
    type Entity: Entity;

    /// `(field name, current value)` for each field that must not be blank.
    fn required(&self) -> Vec<(&'static str, &str)>;

    fn validate(&self) -> Result<(), Error> {
        require(&self.required())
    }

    fn into_new(self, today: NaiveDate) -> Self::Entity;

    fn into_patch(self) -> <Self::Entity as Entity>::Patch;
}

/// Fails with the names of every blank field, in declaration order.
pub fn require(fields: &[(&'static str, &str)]) -> Result<(), Error> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation { missing })
    }
}

/// Comma separated input to a trimmed list, blanks dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Leading-integer parse: `" 12abc"` is 12. No digits, or zero, yields `default`.
pub fn parse_int_or(raw: &str, default: i64) -> i64 {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => default,
        Ok(n) => sign * n,
    }
}

/// Non-negative counter from text, falling back to `default`.
pub fn parse_count_or(raw: &str, default: u32) -> u32 {
    u32::try_from(parse_int_or(raw, i64::from(default))).unwrap_or(default)
}

/// Leading-decimal parse: `"19.99 USD"` is 19.99. No number, or zero, yields `default`.
pub fn parse_float_or(raw: &str, default: f64) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return default;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    match s[..end].parse::<f64>() {
        Ok(v) if v != 0.0 && v.is_finite() => v,
        _ => default,
    }
}

fn non_empty(raw: String) -> Option<String> {
    let t = raw.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_lists_every_blank_field() {
        let err = require(&[("name", "  "), ("template", "t"), ("message", "")]).unwrap_err();
        assert_eq!(err.missing_fields(), &["name", "message"]);
        assert_eq!(err.to_string(), "Please fill in all required fields");
        assert!(require(&[("name", "x")]).is_ok());
    }

    #[test]
    fn int_parsing_takes_the_leading_number() {
        assert_eq!(parse_int_or("12abc", 5), 12);
        assert_eq!(parse_int_or("  -3", 5), -3);
        assert_eq!(parse_int_or("abc", 5), 5);
        assert_eq!(parse_int_or("", 5), 5);
        assert_eq!(parse_int_or("0", 5), 5);
        assert_eq!(parse_count_or("-3", 0), 0);
    }

    #[test]
    fn float_parsing_takes_the_leading_number() {
        assert_eq!(parse_float_or("19.99 USD", 0.0), 19.99);
        assert_eq!(parse_float_or(".5", 0.0), 0.5);
        assert_eq!(parse_float_or("1e3x", 0.0), 1000.0);
        assert_eq!(parse_float_or("2e", 0.0), 2.0);
        assert_eq!(parse_float_or("-", 7.5), 7.5);
        assert_eq!(parse_float_or("n/a", 0.0), 0.0);
    }

    #[test]
    fn list_splitting_drops_blanks() {
        assert_eq!(split_list("hello, hi,, hey "), vec!["hello", "hi", "hey"]);
        assert!(split_list(" , ").is_empty());
    }
}
