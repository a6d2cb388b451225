// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use backoffice_app::{
    CommitOutcome, FilterState, Modal, ModalKind, PAGE_SIZES, PageKind, Record, RecordId,
    SortDirection, SortSpec, Submission, Value,
};
use backoffice_store::seed::{
    CATALOG, PRODUCTS, PURCHASES, REPORTS, ROLES, SALES, STOCK_MOVEMENTS, TICKETS, USERS,
    WORKERS,
};
use backoffice_store::{
    RecordStore, commit, export_csv, paginate, run_query, seed_store, submit, total_pages,
};
use backoffice_testkit::{AdminFaker, date, values};
use std::collections::BTreeSet;
use time::Month;

fn ids(rows: &[Record]) -> Vec<RecordId> {
    rows.iter().map(|record| record.id).collect()
}

fn generated_store(page: PageKind, seed: u64, count: usize) -> Result<RecordStore> {
    let schema = backoffice_store::schema_for(page).expect("record page");
    let records = AdminFaker::new(seed).records(schema, count)?;
    RecordStore::from_records(page, records)
}

#[test]
fn search_results_are_exactly_the_matching_records() -> Result<()> {
    let store = generated_store(PageKind::Products, 21, 40)?;
    for needle in ["key", "MONITOR", " dock ", "zzz"] {
        let mut filter = FilterState::for_schema(&PRODUCTS);
        filter.set_search(needle);
        let rows = run_query(&PRODUCTS, store.records(), &filter);
        let hits: BTreeSet<RecordId> = ids(&rows).into_iter().collect();
        let term = needle.trim();
        for record in store.records() {
            let matches = PRODUCTS
                .searchable_fields()
                .any(|field| record.get(field.name).matches_text(term));
            assert_eq!(hits.contains(&record.id), matches, "needle {needle:?} id {}", record.id);
        }
    }
    Ok(())
}

#[test]
fn empty_search_returns_everything() -> Result<()> {
    let store = seed_store(PageKind::Tickets)?;
    let mut filter = FilterState::for_schema(&TICKETS);
    filter.set_search("   ");
    assert_eq!(
        run_query(&TICKETS, store.records(), &filter).len(),
        store.len()
    );
    Ok(())
}

#[test]
fn reapplying_filters_changes_nothing() -> Result<()> {
    let store = generated_store(PageKind::Tickets, 8, 30)?;
    let mut filter = FilterState::for_schema(&TICKETS);
    filter.set_search("a");
    filter.toggle_multi("priority", "High");
    filter.toggle_multi("priority", "Urgent");
    let first = run_query(&TICKETS, store.records(), &filter);

    let again = run_query(&TICKETS, &first, &filter);
    assert_eq!(first, again);

    let mut same = filter.clone();
    same.set_search("a");
    assert_eq!(run_query(&TICKETS, store.records(), &same), first);
    Ok(())
}

#[test]
fn pages_partition_the_filtered_rows() -> Result<()> {
    let store = generated_store(PageKind::Users, 5, 23)?;
    let rows = run_query(&USERS, store.records(), &FilterState::for_schema(&USERS));
    for size in PAGE_SIZES {
        let pages = total_pages(rows.len(), size);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&rows, page, size);
            if page < pages {
                assert_eq!(slice.items.len(), size, "page {page} of {pages}, size {size}");
            } else {
                assert!(!slice.items.is_empty() && slice.items.len() <= size);
            }
            seen.extend(ids(&slice.items));
        }
        assert_eq!(seen, ids(&rows), "page size {size}");
    }
    Ok(())
}

#[test]
fn descending_sort_reverses_ascending() -> Result<()> {
    let store = generated_store(PageKind::Products, 13, 25)?;
    for field in ["price", "name", "stock", "category"] {
        let mut filter = FilterState::for_schema(&PRODUCTS);
        filter.set_sort(Some(SortSpec {
            field: field.to_owned(),
            direction: SortDirection::Asc,
        }));
        let ascending = ids(&run_query(&PRODUCTS, store.records(), &filter));
        filter.sort_by(field);
        assert_eq!(
            filter.sort().map(|sort| sort.direction),
            Some(SortDirection::Desc)
        );
        let mut descending = ids(&run_query(&PRODUCTS, store.records(), &filter));
        descending.reverse();
        assert_eq!(ascending, descending, "field {field}");
    }
    Ok(())
}

#[test]
fn create_edit_delete_round_trip() -> Result<()> {
    let mut store = seed_store(PageKind::Products)?;
    let before = store.len();
    let mut faker = AdminFaker::new(99);

    let CommitOutcome::Created(id) = commit(
        &mut store,
        &PRODUCTS,
        &Submission::Create {
            values: faker.draft_values(&PRODUCTS),
        },
    )?
    else {
        panic!("generated product should validate");
    };
    assert_eq!(store.len(), before + 1);

    let mut edited = faker.draft_values(&PRODUCTS);
    edited.insert("price".to_owned(), "$45,500".to_owned());
    let outcome = commit(&mut store, &PRODUCTS, &Submission::Update { id, values: edited })?;
    assert_eq!(outcome, CommitOutcome::Updated(id));
    assert_eq!(
        store.get(id).map(|record| record.get("price").clone()),
        Some(Value::Integer(45_500))
    );
    assert_eq!(store.len(), before + 1);

    commit(&mut store, &PRODUCTS, &Submission::Delete { id })?;
    assert_eq!(store.len(), before);
    assert!(store.get(id).is_none());
    Ok(())
}

#[test]
fn untouched_decimal_survives_repeated_edits() -> Result<()> {
    let mut store = seed_store(PageKind::Sales)?;
    let id = store.records()[0].id;
    let mut modal = Modal::default();

    modal.open_edit(&SALES, store.get(id).cloned().expect("seeded sale"));
    modal
        .draft_mut()
        .expect("edit draft")
        .set("tax_percent", "19.125");
    let outcome = submit(&mut store, &SALES, &mut modal)?.expect("outcome");
    assert_eq!(outcome, CommitOutcome::Updated(id));

    modal.open_edit(&SALES, store.get(id).cloned().expect("edited sale"));
    let draft = modal.draft_mut().expect("edit draft");
    assert_eq!(draft.value("tax_percent"), Some("19.125"));
    draft.set("customer", "Juana Pérez");
    let outcome = submit(&mut store, &SALES, &mut modal)?.expect("outcome");
    assert_eq!(outcome, CommitOutcome::Updated(id));

    let record = store.get(id).expect("sale kept");
    assert_eq!(record.get("tax_percent"), &Value::Decimal(19.125));
    assert_eq!(record.display("customer"), "Juana Pérez");
    Ok(())
}

#[test]
fn blank_required_field_rejects_without_touching_store() -> Result<()> {
    let mut store = seed_store(PageKind::Products)?;
    let snapshot = store.clone();
    let mut modal = Modal::default();
    modal.open_create(&PRODUCTS);
    let draft = modal.draft_mut().expect("create draft");
    draft.set("name", "");
    draft.set("price", "19990");
    draft.set("category", "Books");
    draft.set("stock", "1");

    let outcome = submit(&mut store, &PRODUCTS, &mut modal)?.expect("outcome");
    assert!(!outcome.is_applied());
    assert_eq!(store, snapshot);
    assert_eq!(modal.kind(), ModalKind::Creating);
    let draft = modal.draft().expect("draft kept");
    assert_eq!(draft.errors.get("name"), Some("Name is required"));
    assert_eq!(draft.value("price"), Some("19990"));
    Ok(())
}

#[test]
fn duplicate_email_rejected_except_for_own_record() -> Result<()> {
    let mut store = seed_store(PageKind::Users)?;
    let juan = store
        .records()
        .iter()
        .find(|record| record.display("email") == "juan@example.com")
        .map(|record| record.id)
        .expect("seeded user");

    let outcome = commit(
        &mut store,
        &USERS,
        &Submission::Create {
            values: values(&[("name", "Juana Pérez"), ("email", "JUAN@example.com")]),
        },
    )?;
    let CommitOutcome::Rejected(errors) = outcome else {
        panic!("duplicate email accepted");
    };
    assert!(errors.contains("email"));

    let outcome = commit(
        &mut store,
        &USERS,
        &Submission::Update {
            id: juan,
            values: values(&[
                ("name", "Juan Pablo Pérez"),
                ("email", "juan@example.com"),
                ("role", "Administrator"),
                ("status", "active"),
            ]),
        },
    )?;
    assert_eq!(outcome, CommitOutcome::Updated(juan));
    Ok(())
}

#[test]
fn date_range_is_inclusive_and_excludes_outside() -> Result<()> {
    let mut store = RecordStore::new(PageKind::StockMovements);
    for day in ["2025-06-01", "2025-06-15", "2025-06-30"] {
        let outcome = commit(
            &mut store,
            &STOCK_MOVEMENTS,
            &Submission::Create {
                values: values(&[
                    ("product", "Acer Laptop"),
                    ("kind", "Out"),
                    ("quantity", "1"),
                    ("date", day),
                ]),
            },
        )?;
        assert!(outcome.is_applied(), "{day}: {outcome:?}");
    }

    let mut filter = FilterState::for_schema(&STOCK_MOVEMENTS);
    filter.set_date_range(
        "date",
        Some(date(2025, Month::June, 10)),
        Some(date(2025, Month::June, 20)),
    );
    let rows = run_query(&STOCK_MOVEMENTS, store.records(), &filter);
    let days: Vec<String> = rows.iter().map(|record| record.display("date")).collect();
    assert_eq!(days, vec!["2025-06-15"]);

    filter.set_date_range(
        "date",
        Some(date(2025, Month::June, 15)),
        Some(date(2025, Month::June, 30)),
    );
    assert_eq!(run_query(&STOCK_MOVEMENTS, store.records(), &filter).len(), 2);
    Ok(())
}

#[test]
fn roles_permission_filter_and_export() -> Result<()> {
    let store = seed_store(PageKind::Roles)?;
    let mut filter = FilterState::for_schema(&ROLES);
    filter.set_contains("permissions", "tickets");
    let rows = run_query(&ROLES, store.records(), &filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display("name"), "support");

    let mut buffer = Vec::new();
    assert_eq!(export_csv(&ROLES, &rows, &mut buffer)?, 1);
    let text = String::from_utf8(buffer)?;
    assert_eq!(text, "Role,Permissions\nsupport,view_tickets; respond_tickets\n");
    Ok(())
}

#[test]
fn sales_export_matches_visible_rows() -> Result<()> {
    let store = seed_store(PageKind::Sales)?;
    let mut filter = FilterState::for_schema(&SALES);
    filter.set_exact("status", Some("Paid"));
    let rows = run_query(&SALES, store.records(), &filter);
    let mut buffer = Vec::new();
    let written = export_csv(&SALES, &rows, &mut buffer)?;
    assert_eq!(written, rows.len());
    assert_eq!(String::from_utf8(buffer)?.lines().count(), rows.len() + 1);
    Ok(())
}

#[test]
fn generated_rows_validate_on_every_page() -> Result<()> {
    for schema in CATALOG {
        let store = generated_store(schema.page, 4, 12)?;
        let rows = run_query(schema, store.records(), &FilterState::for_schema(schema));
        assert_eq!(rows.len(), 12, "page {:?}", schema.page);
    }
    Ok(())
}

#[test]
fn workers_filter_by_role_and_sort_by_full_name() -> Result<()> {
    let store = seed_store(PageKind::Workers)?;
    let mut filter = FilterState::for_schema(&WORKERS);
    let names: Vec<String> = run_query(&WORKERS, store.records(), &filter)
        .iter()
        .map(|record| record.display("full_name"))
        .collect();
    assert_eq!(names, vec!["Carlos Ruiz", "María López", "Pedro Osorio"]);

    filter.set_exact("status", Some("active"));
    filter.set_exact("role", Some("Technician"));
    let rows = run_query(&WORKERS, store.records(), &filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display("email"), "maria@company.cl");

    let outcome = commit(
        &mut store.clone(),
        &WORKERS,
        &Submission::Create {
            values: values(&[
                ("full_name", "Ana Rojas"),
                ("email", "ana@company"),
                ("role", ""),
                ("status", "active"),
            ]),
        },
    )?;
    let CommitOutcome::Rejected(errors) = outcome else {
        panic!("invalid worker accepted");
    };
    assert_eq!(errors.fields(), vec!["email", "role"]);
    Ok(())
}

#[test]
fn reports_date_window_and_export() -> Result<()> {
    let store = seed_store(PageKind::Reports)?;
    let mut filter = FilterState::for_schema(&REPORTS);
    filter.set_date_range(
        "date",
        Some(date(2025, Month::June, 10)),
        Some(date(2025, Month::June, 20)),
    );
    let rows = run_query(&REPORTS, store.records(), &filter);
    let titles: Vec<String> = rows.iter().map(|record| record.display("title")).collect();
    assert_eq!(titles, vec!["Weekly Sales", "Current Inventory", "Quarterly Balance"]);

    let everything = run_query(&REPORTS, store.records(), &FilterState::for_schema(&REPORTS));
    assert_eq!(total_pages(everything.len(), REPORTS.page_size), 2);

    let mut buffer = Vec::new();
    assert_eq!(export_csv(&REPORTS, &rows, &mut buffer)?, 3);
    let text = String::from_utf8(buffer)?;
    assert_eq!(text.lines().next(), Some("Title,Date,Summary"));
    assert!(text.contains("Quarterly Balance,2025-06-10,Balance for the quarter."));
    Ok(())
}

#[test]
fn purchases_filter_by_status_and_single_day() -> Result<()> {
    let mut store = seed_store(PageKind::Purchases)?;
    let mut filter = FilterState::for_schema(&PURCHASES);
    filter.set_exact("status", Some("pending"));
    let rows = run_query(&PURCHASES, store.records(), &filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display("supplier"), "Supplier Two");

    let day = date(2025, Month::June, 20);
    let mut filter = FilterState::for_schema(&PURCHASES);
    filter.set_date_range("date", Some(day), Some(day));
    let rows = run_query(&PURCHASES, store.records(), &filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("total"), &Value::Integer(152_000));

    let outcome = commit(
        &mut store,
        &PURCHASES,
        &Submission::Create {
            values: values(&[
                ("supplier", "Supplier Three"),
                ("date", "2025-06-22"),
                ("status", "cancelled"),
                ("total", "$12,500"),
                ("items", "0"),
            ]),
        },
    )?;
    let CommitOutcome::Rejected(errors) = outcome else {
        panic!("zero items accepted");
    };
    assert_eq!(errors.fields(), vec!["items"]);
    assert_eq!(store.len(), 2);
    Ok(())
}
