// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use backoffice_app::{Derived, Record, Schema, Value};
use regex::Regex;
use std::sync::LazyLock;

static COUPON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DESC(\d{1,2})$").expect("coupon pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleTotals {
    pub tax_amount: f64,
    pub discount: f64,
    pub final_total: f64,
}

/// Percentage off encoded in a `DESC<n>` coupon, if the code is well formed.
pub fn coupon_percent(coupon: &str) -> Option<u32> {
    let captures = COUPON_PATTERN.captures(coupon.trim())?;
    captures.get(1)?.as_str().parse().ok()
}

pub fn sale_totals(total: f64, tax_percent: f64, coupon: &str) -> SaleTotals {
    let tax_amount = total * tax_percent / 100.0;
    let discount = coupon_percent(coupon).map_or(0.0, |percent| total * f64::from(percent) / 100.0);
    SaleTotals {
        tax_amount,
        discount,
        final_total: total + tax_amount - discount,
    }
}

/// Returns the record with the schema's computed columns filled in.
pub fn derive(schema: &Schema, record: &Record) -> Record {
    let mut record = record.clone();
    match schema.derived {
        None => {}
        Some(Derived::SaleTotals) => {
            let total = record.get("total").as_f64().unwrap_or(0.0);
            let tax_percent = record.get("tax_percent").as_f64().unwrap_or(0.0);
            let coupon = record.display("coupon");
            let totals = sale_totals(total, tax_percent, &coupon);
            record.set("tax_amount", Value::Decimal(totals.tax_amount));
            record.set("discount", Value::Decimal(totals.discount));
            record.set("final_total", Value::Decimal(totals.final_total));
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::{coupon_percent, derive, sale_totals};
    use crate::seed::SALES;
    use backoffice_app::{Record, RecordId, Value};

    #[test]
    fn coupon_codes() {
        assert_eq!(coupon_percent("DESC10"), Some(10));
        assert_eq!(coupon_percent("DESC5"), Some(5));
        assert_eq!(coupon_percent("DESC100"), None);
        assert_eq!(coupon_percent("desc10"), None);
        assert_eq!(coupon_percent(""), None);
    }

    #[test]
    fn totals_apply_tax_then_discount() {
        let totals = sale_totals(20_000.0, 19.0, "DESC10");
        assert_eq!(totals.tax_amount, 3_800.0);
        assert_eq!(totals.discount, 2_000.0);
        assert_eq!(totals.final_total, 21_800.0);

        let plain = sale_totals(10_000.0, 19.0, "SUMMER");
        assert_eq!(plain.discount, 0.0);
        assert_eq!(plain.final_total, 11_900.0);
    }

    #[test]
    fn derive_fills_sale_columns() {
        let record = Record::new(RecordId::new(1))
            .with("total", Value::Integer(20_000))
            .with("tax_percent", Value::Decimal(19.0))
            .with("coupon", Value::text("DESC10"));
        let derived = derive(&SALES, &record);
        assert_eq!(derived.get("final_total"), &Value::Decimal(21_800.0));
        assert_eq!(derived.get("discount"), &Value::Decimal(2_000.0));
        assert!(record.get("final_total").is_empty());
    }
}
