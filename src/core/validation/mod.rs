//! Declarative input checking.
//!
//! A [`Checker`] walks one JSON object, applies a rule per field and keeps
//! going after a failure, so callers get every violation at once. Values it
//! hands back are already normalized: numeric strings become numbers,
//! `"true"`/`"false"` become booleans, precision-limited numbers are rounded.
//! Fields no rule asks for are never read, which strips them.

mod schemas;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Input types that can be built from an untyped JSON document.
pub trait Schema: Sized {
    fn check(checker: &mut Checker<'_>) -> Option<Self>;
}

/// Validates a whole document against `T`'s schema.
pub fn validate<T: Schema>(input: &Value) -> Result<T, Vec<String>> {
    let Some(doc) = input.as_object() else {
        return Err(vec!["\"value\" must be of type object".to_string()]);
    };
    let mut checker = Checker::new(doc);
    let value = T::check(&mut checker);
    checker.finish(value)
}

#[derive(Debug, Clone, Copy)]
pub enum StringFormat {
    Email,
    Uri,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringRule {
    required: bool,
    min: Option<usize>,
    max: Option<usize>,
    format: Option<StringFormat>,
    one_of: Option<&'static [&'static str]>,
}

impl StringRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, chars: usize) -> Self {
        self.min = Some(chars);
        self
    }

    pub fn max(mut self, chars: usize) -> Self {
        self.max = Some(chars);
        self
    }

    pub fn email(mut self) -> Self {
        self.format = Some(StringFormat::Email);
        self
    }

    pub fn uri(mut self) -> Self {
        self.format = Some(StringFormat::Uri);
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.one_of = Some(allowed);
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRule {
    required: bool,
    positive: bool,
    integer: bool,
    min: Option<f64>,
    max: Option<f64>,
    precision: Option<i32>,
}

impl NumberRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Rounds to this many decimal places.
    pub fn precision(mut self, places: i32) -> Self {
        self.precision = Some(places);
        self
    }
}

pub struct Checker<'a> {
    doc: &'a Map<String, Value>,
    prefix: String,
    violations: Vec<String>,
}

impl<'a> Checker<'a> {
    pub fn new(doc: &'a Map<String, Value>) -> Self {
        Checker {
            doc,
            prefix: String::new(),
            violations: Vec::new(),
        }
    }

    fn nested(doc: &'a Map<String, Value>, prefix: String) -> Self {
        Checker {
            doc,
            prefix,
            violations: Vec::new(),
        }
    }

    fn label(&self, key: &str) -> String {
        format!("\"{}{}\"", self.prefix, key)
    }

    pub fn reject(&mut self, key: &str, problem: &str) {
        let label = self.label(key);
        self.violations.push(format!("{} {}", label, problem));
    }

    /// Present and not null.
    fn present(&mut self, key: &str, required: bool) -> Option<&'a Value> {
        match self.doc.get(key) {
            None | Some(Value::Null) => {
                if required {
                    self.reject(key, "is required");
                }
                None
            }
            Some(value) => Some(value),
        }
    }

    pub fn string(&mut self, key: &str, rule: StringRule) -> Option<String> {
        let value = self.present(key, rule.required)?;
        let Some(s) = value.as_str() else {
            self.reject(key, "must be a string");
            return None;
        };
        if let Some(allowed) = rule.one_of {
            if !allowed.contains(&s) {
                self.reject(key, &format!("must be one of [{}]", allowed.join(", ")));
                return None;
            }
        }
        if s.is_empty() {
            self.reject(key, "is not allowed to be empty");
            return None;
        }

        let before = self.violations.len();
        let len = s.chars().count();
        if let Some(min) = rule.min {
            if len < min {
                self.reject(key, &format!("length must be at least {} characters long", min));
            }
        }
        if let Some(max) = rule.max {
            if len > max {
                self.reject(key, &format!("length must be less than or equal to {} characters long", max));
            }
        }
        match rule.format {
            Some(StringFormat::Email) if !is_email(s) => self.reject(key, "must be a valid email"),
            Some(StringFormat::Uri) if url::Url::parse(s).is_err() => self.reject(key, "must be a valid uri"),
            _ => {}
        }

        (self.violations.len() == before).then(|| s.to_string())
    }

    pub fn number(&mut self, key: &str, rule: NumberRule) -> Option<f64> {
        let value = self.present(key, rule.required)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let Some(mut n) = parsed.filter(|n| n.is_finite()) else {
            self.reject(key, "must be a number");
            return None;
        };
        if let Some(places) = rule.precision {
            let factor = 10f64.powi(places);
            n = (n * factor).round() / factor;
        }

        let before = self.violations.len();
        if rule.integer && n.fract() != 0.0 {
            self.reject(key, "must be an integer");
        }
        if rule.positive && n <= 0.0 {
            self.reject(key, "must be a positive number");
        }
        if let Some(min) = rule.min {
            if n < min {
                self.reject(key, &format!("must be greater than or equal to {}", min));
            }
        }
        if let Some(max) = rule.max {
            if n > max {
                self.reject(key, &format!("must be less than or equal to {}", max));
            }
        }

        (self.violations.len() == before).then_some(n)
    }

    /// Non-negative integer that fits in `u32`.
    pub fn count(&mut self, key: &str, required: bool) -> Option<u32> {
        let mut rule = NumberRule::new().integer().min(0.0).max(f64::from(u32::MAX));
        if required {
            rule = rule.required();
        }
        self.number(key, rule).map(|n| n as u32)
    }

    pub fn boolean(&mut self, key: &str) -> Option<bool> {
        let value = self.present(key, false)?;
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => {
                self.reject(key, "must be a boolean");
                None
            }
        }
    }

    /// ISO-8601 date or date-time. Missing offsets are read as UTC.
    pub fn date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        let value = self.present(key, false)?;
        let parsed = value.as_str().and_then(parse_iso_8601);
        if parsed.is_none() {
            self.reject(key, "must be in ISO 8601 date format");
        }
        parsed
    }

    /// Array whose items are objects checked by `item`. `None` when absent
    /// or when any item failed.
    pub fn objects<T>(
        &mut self,
        key: &str,
        mut item: impl FnMut(&mut Checker<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let value = self.present(key, false)?;
        let Some(items) = value.as_array() else {
            self.reject(key, "must be an array");
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        let mut failed = false;
        for (index, entry) in items.iter().enumerate() {
            let element = format!("{}{}[{}]", self.prefix, key, index);
            let Some(obj) = entry.as_object() else {
                self.violations.push(format!("\"{}\" must be of type object", element));
                failed = true;
                continue;
            };
            let mut inner = Checker::nested(obj, format!("{}.", element));
            match item(&mut inner) {
                Some(v) if inner.violations.is_empty() => out.push(v),
                _ => failed = true,
            }
            self.violations.append(&mut inner.violations);
        }
        (!failed).then_some(out)
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn finish<T>(self, value: Option<T>) -> Result<T, Vec<String>> {
        match value {
            Some(v) if self.violations.is_empty() => Ok(v),
            _ if self.violations.is_empty() => Err(vec!["\"value\" is invalid".to_string()]),
            _ => Err(self.violations),
        }
    }
}

fn parse_iso_8601(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
    }

    let (local, offset) = split_offset(s)?;
    let naive = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M"))
        .ok()?;
    naive
        .and_local_timezone(offset)
        .single()
        .map(|d| d.with_timezone(&Utc))
}

/// Splits a trailing `Z` or `±HH:MM` off a date-time. No suffix means UTC.
fn split_offset(s: &str) -> Option<(&str, FixedOffset)> {
    if let Some(local) = s.strip_suffix(['Z', 'z']) {
        return Some((local, FixedOffset::east_opt(0)?));
    }

    let bytes = s.as_bytes();
    let n = bytes.len();
    let has_offset = n > 6
        && s.contains('T')
        && matches!(bytes[n - 6], b'+' | b'-')
        && bytes[n - 3] == b':';
    if !has_offset {
        return Some((s, FixedOffset::east_opt(0)?));
    }

    let hours: i32 = s.get(n - 5..n - 3)?.parse().ok()?;
    let minutes: i32 = s.get(n - 2..)?.parse().ok()?;
    let secs = hours * 3600 + minutes * 60;
    let offset = if bytes[n - 6] == b'-' {
        FixedOffset::west_opt(secs)?
    } else {
        FixedOffset::east_opt(secs)?
    };
    Some((s.get(..n - 6)?, offset))
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|l| !l.is_empty() && !l.starts_with('-') && !l.ends_with('-'))
        && labels.last().is_some_and(|tld| tld.len() >= 2 && tld.chars().all(char::is_alphabetic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_shapes() {
        assert!(is_email("a@x.com"));
        assert!(is_email("first.last@mail.example.org"));
        assert!(!is_email("a@x"));
        assert!(!is_email("@x.com"));
        assert!(!is_email("a b@x.com"));
        assert!(!is_email("a@@x.com"));
        assert!(!is_email("a@x.c0m"));
    }

    #[test]
    fn numeric_strings_are_coerced_and_rounded() {
        let doc = json!({ "price": "12.346" });
        let mut checker = Checker::new(doc.as_object().unwrap());
        let price = checker.number("price", NumberRule::new().positive().precision(2));
        assert_eq!(price, Some(12.35));
        assert!(checker.is_clean());
    }

    #[test]
    fn nested_items_are_labelled_with_their_index() {
        let doc = json!({ "variants": [{ "size": "M", "color": "red", "quantity": 1 }, { "color": "" }] });
        let mut checker = Checker::new(doc.as_object().unwrap());
        let out = checker.objects("variants", |item| {
            let size = item.string("size", StringRule::new().required());
            let color = item.string("color", StringRule::new().required());
            Some((size?, color?))
        });
        assert!(out.is_none());
        assert_eq!(
            checker.violations,
            vec![
                "\"variants[1].size\" is required".to_string(),
                "\"variants[1].color\" is not allowed to be empty".to_string(),
            ]
        );
    }
}
