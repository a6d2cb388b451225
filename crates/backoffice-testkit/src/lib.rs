// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use backoffice_app::{
    FieldKind, FieldSpec, Record, RecordId, Rule, Schema, validate_draft, validation::format_date,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const NOUNS: [&str; 16] = [
    "Keyboard", "Monitor", "Router", "Notebook", "Cable", "Adapter", "Speaker", "Charger",
    "Tablet", "Printer", "Scanner", "Headset", "Webcam", "Dock", "Drive", "Lamp",
];
const WORDS: [&str; 24] = [
    "inspect",
    "repair",
    "replace",
    "service",
    "deliver",
    "confirm",
    "schedule",
    "estimate",
    "invoice",
    "return",
    "update",
    "review",
    "customer",
    "warehouse",
    "screen",
    "battery",
    "order",
    "payment",
    "shipment",
    "account",
    "clean",
    "test",
    "verify",
    "upgrade",
];
const STREETS: [&str; 10] = [
    "Cedar", "Maple", "Oak", "Pine", "Willow", "Elm", "Birch", "Juniper", "Sunset", "Ridge",
];

/// First day of the window generated dates fall in.
pub const REFERENCE_START: (i32, Month, u8) = (2025, Month::January, 1);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Generates form input that passes validation for any page schema. The same
/// seed always yields the same rows.
#[derive(Debug, Clone)]
pub struct AdminFaker {
    rng: DeterministicRng,
    serial: u64,
}

impl AdminFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            serial: 0,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    pub fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    pub fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    /// A date within the 2025 reference year.
    pub fn date(&mut self) -> Date {
        let offset = self.int_range(0, 364);
        reference_start() + Duration::days(offset)
    }

    /// Raw text for every editable field, as a user would type it into the
    /// create form. Unique fields get a serial suffix so repeated calls on
    /// one faker never collide.
    pub fn draft_values(&mut self, schema: &Schema) -> BTreeMap<String, String> {
        self.serial += 1;
        let mut values = BTreeMap::new();
        let mut dates: BTreeMap<&str, Date> = BTreeMap::new();

        for field in schema.editable_fields() {
            if after_field(field).is_some() {
                continue;
            }
            let text = match field.kind {
                FieldKind::Date => {
                    let date = self.date();
                    dates.insert(field.name, date);
                    format_date(Some(date))
                }
                _ => self.field_text(field),
            };
            values.insert(field.name.to_owned(), text);
        }

        for field in schema.editable_fields() {
            let Some(other) = after_field(field) else {
                continue;
            };
            let start = dates.get(other).copied().unwrap_or_else(reference_start);
            let date = start + Duration::days(self.int_range(0, 30));
            values.insert(field.name.to_owned(), format_date(Some(date)));
        }
        values
    }

    /// `count` validated records with ids `1..=count`.
    pub fn records(&mut self, schema: &Schema, count: usize) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = Vec::with_capacity(count);
        for index in 0..count {
            let values = self.draft_values(schema);
            let fields = validate_draft(schema, &values, &records, None).map_err(|errors| {
                anyhow!(
                    "generated {} row {} is invalid: {errors}",
                    schema.singular,
                    index + 1
                )
            })?;
            let id = RecordId::new(i64::try_from(index + 1).context("record id overflow")?);
            records.push(Record { id, fields });
        }
        Ok(records)
    }

    fn field_text(&mut self, field: &FieldSpec) -> String {
        let rules = field.rules;
        let unique = rules
            .iter()
            .any(|rule| matches!(rule, Rule::Unique { .. }));
        match field.kind {
            FieldKind::Choice(options) => self.pick(options).to_owned(),
            FieldKind::Integer => self.int_range(1, 50).to_string(),
            FieldKind::Amount => (self.int_range(1, 500) * 990).to_string(),
            FieldKind::Decimal => self.int_range(0, 25).to_string(),
            FieldKind::Date => format_date(Some(self.date())),
            FieldKind::List => {
                let count = self.int_range(1, 3) as usize;
                let items: Vec<&str> = (0..count).map(|_| self.pick(&NOUNS)).collect();
                items.join(", ")
            }
            FieldKind::LongText => self.sentence(4, 10),
            FieldKind::Text => {
                if rules.contains(&Rule::Email) {
                    return format!(
                        "{}.{}{}@example.com",
                        self.pick(&FIRST_NAMES).to_lowercase(),
                        self.pick(&LAST_NAMES).to_lowercase(),
                        self.serial
                    );
                }
                if rules.contains(&Rule::TaxId) {
                    return format!("{}-{}", 20_000_000 + self.serial, self.int_n(10));
                }
                if let Some(Rule::PhoneDigits { min, .. }) = rules
                    .iter()
                    .find(|rule| matches!(rule, Rule::PhoneDigits { .. }))
                {
                    return (0..*min).map(|_| char::from(b'0' + self.int_n(10) as u8)).collect();
                }
                if rules.iter().any(|rule| matches!(rule, Rule::Pattern { .. })) {
                    // Free-form patterns cannot be synthesized; leave optional ones blank.
                    return String::new();
                }
                let base = if field.name.contains("address") {
                    format!("{} {} St", self.int_range(1, 999), self.pick(&STREETS))
                } else if field.name.contains("name")
                    || matches!(field.name, "customer" | "client" | "payer" | "technician")
                {
                    self.person_name()
                } else {
                    format!("{} {}", self.pick(&NOUNS), self.pick(&WORDS))
                };
                if unique {
                    format!("{base} {}", self.serial)
                } else {
                    base
                }
            }
        }
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let count = self.int_range(min_words as i64, max_words as i64) as usize;
        let mut sentence = (0..count)
            .map(|_| self.pick(&WORDS))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

fn after_field(field: &FieldSpec) -> Option<&'static str> {
    field.rules.iter().find_map(|rule| match rule {
        Rule::NotBefore(other) => Some(*other),
        _ => None,
    })
}

fn reference_start() -> Date {
    let (year, month, day) = REFERENCE_START;
    Date::from_calendar_date(year, month, day).expect("valid calendar date")
}

/// Calendar date shorthand for assertions.
pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid calendar date")
}

/// String map from literal pairs, the shape forms submit.
pub fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(field, value)| ((*field).to_owned(), (*value).to_owned()))
        .collect()
}

pub fn temp_export_dir() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("exports");
    std::fs::create_dir_all(&path)
        .with_context(|| format!("create export dir {}", path.display()))?;
    Ok((dir, path))
}
