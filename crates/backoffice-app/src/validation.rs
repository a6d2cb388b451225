// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidNumber,
    NotWhole,
    InvalidAmount,
    InvalidDate,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber => f.write_str("invalid number"),
            Self::NotWhole => f.write_str("expected a whole number"),
            Self::InvalidAmount => f.write_str("invalid amount"),
            Self::InvalidDate => f.write_str("invalid date value"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn parse_number(input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidNumber);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber)?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber);
    }
    Ok(value)
}

pub fn parse_whole(input: &str) -> ValidationResult<i64> {
    let value = parse_number(input)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotWhole);
    }
    if value.abs() > 9_007_199_254_740_992.0 {
        return Err(ValidationError::InvalidNumber);
    }
    Ok(value as i64)
}

/// Parses a whole-unit money value. Accepts a leading `$` and `,` grouping.
pub fn parse_amount(input: &str) -> ValidationResult<i64> {
    let clean = input.trim().replace(',', "");
    let (negative, clean) = match clean.strip_prefix('-') {
        Some(rest) => (true, rest.to_owned()),
        None => (false, clean),
    };
    let clean = clean.strip_prefix('$').unwrap_or(&clean);
    if clean.is_empty() {
        return Err(ValidationError::InvalidAmount);
    }
    let value = parse_whole(clean).map_err(|error| match error {
        ValidationError::NotWhole => ValidationError::NotWhole,
        _ => ValidationError::InvalidAmount,
    })?;
    if value < 0 {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(if negative { -value } else { value })
}

pub fn format_amount(amount: i64) -> String {
    let (sign, amount) = normalize_sign(amount);
    format!("{sign}${}", comma_format(amount))
}

pub fn format_decimal_amount(amount: f64) -> String {
    format_amount(amount.round() as i64)
}

pub fn parse_required_date(input: &str) -> ValidationResult<Date> {
    parse_date(input.trim())
}

pub fn parse_optional_date(input: &str) -> ValidationResult<Option<Date>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_date(trimmed).map(Some)
}

pub fn format_date(value: Option<Date>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .expect("date format is valid")
}

/// Splits comma-separated input into trimmed, non-empty items.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input, &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

fn comma_format(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let mut chars = digits.chars().collect::<Vec<_>>();
    let mut count = 0usize;
    while let Some(ch) = chars.pop() {
        if count == 3 {
            out.push(',');
            count = 0;
        }
        out.push(ch);
        count += 1;
    }
    out.chars().rev().collect()
}

fn normalize_sign(amount: i64) -> (&'static str, i64) {
    if amount >= 0 {
        return ("", amount);
    }
    if amount == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -amount)
    }
}
