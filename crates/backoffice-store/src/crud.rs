// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use backoffice_app::{CommitOutcome, Modal, Schema, Submission, validate_draft};

use crate::RecordStore;

/// Validates and applies one modal submission. Validation failures come back
/// as `CommitOutcome::Rejected` with the store untouched; only unknown ids
/// are errors.
pub fn commit(
    store: &mut RecordStore,
    schema: &Schema,
    submission: &Submission,
) -> Result<CommitOutcome> {
    let page = schema.page.slug();
    match submission {
        Submission::Create { values } => {
            match validate_draft(schema, values, store.records(), None) {
                Ok(fields) => {
                    let id = store.insert(fields);
                    tracing::info!(page, %id, "record created");
                    Ok(CommitOutcome::Created(id))
                }
                Err(errors) => {
                    tracing::debug!(page, fields = ?errors.fields(), "validation rejected");
                    Ok(CommitOutcome::Rejected(errors))
                }
            }
        }
        Submission::Update { id, values } => {
            if store.get(*id).is_none() {
                bail!(
                    "{} {id} not found -- reload the page and retry",
                    schema.singular
                );
            }
            match validate_draft(schema, values, store.records(), Some(*id)) {
                Ok(fields) => {
                    store.update(*id, fields)?;
                    tracing::info!(page, %id, "record updated");
                    Ok(CommitOutcome::Updated(*id))
                }
                Err(errors) => {
                    tracing::debug!(page, %id, fields = ?errors.fields(), "validation rejected");
                    Ok(CommitOutcome::Rejected(errors))
                }
            }
        }
        Submission::Delete { id } => {
            store.delete(*id)?;
            tracing::info!(page, %id, "record deleted");
            Ok(CommitOutcome::Deleted(*id))
        }
    }
}

/// Commits whatever the modal is holding and settles it. Returns `None` when
/// the modal has nothing to submit.
pub fn submit(
    store: &mut RecordStore,
    schema: &Schema,
    modal: &mut Modal,
) -> Result<Option<CommitOutcome>> {
    let Some(submission) = modal.submission() else {
        return Ok(None);
    };
    let outcome = commit(store, schema, &submission)?;
    modal.settle(&outcome);
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::{commit, submit};
    use crate::seed::{PRODUCTS, USERS, seed_store};
    use anyhow::Result;
    use backoffice_app::{CommitOutcome, Modal, ModalKind, PageKind, RecordId, Submission, Value};
    use std::collections::BTreeMap;

    fn product_values(name: &str) -> BTreeMap<String, String> {
        [
            ("name", name),
            ("price", "15990"),
            ("category", "Books"),
            ("stock", "3"),
            ("status", "active"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
    }

    #[test]
    fn create_assigns_fresh_id() -> Result<()> {
        let mut store = seed_store(PageKind::Products)?;
        let before = store.len();
        let outcome = commit(
            &mut store,
            &PRODUCTS,
            &Submission::Create {
                values: product_values("Domain-Driven Design"),
            },
        )?;
        let CommitOutcome::Created(id) = outcome else {
            panic!("expected create, got {outcome:?}");
        };
        assert_eq!(store.len(), before + 1);
        assert!(store.records()[..before].iter().all(|record| record.id != id));
        assert_eq!(
            store.get(id).map(|record| record.get("price").clone()),
            Some(Value::Integer(15_990))
        );
        Ok(())
    }

    #[test]
    fn rejected_create_leaves_store_untouched() -> Result<()> {
        let mut store = seed_store(PageKind::Products)?;
        let snapshot = store.clone();
        let outcome = commit(
            &mut store,
            &PRODUCTS,
            &Submission::Create {
                values: product_values("ab"),
            },
        )?;
        assert!(matches!(outcome, CommitOutcome::Rejected(ref errors) if errors.contains("name")));
        assert_eq!(store, snapshot);
        Ok(())
    }

    #[test]
    fn update_of_unknown_id_is_an_error() -> Result<()> {
        let mut store = seed_store(PageKind::Products)?;
        let error = commit(
            &mut store,
            &PRODUCTS,
            &Submission::Update {
                id: RecordId::new(404),
                values: product_values("Ghost"),
            },
        )
        .expect_err("unknown id");
        assert!(error.to_string().contains("product 404 not found"));
        Ok(())
    }

    #[test]
    fn delete_removes_record() -> Result<()> {
        let mut store = seed_store(PageKind::Products)?;
        let id = store.records()[0].id;
        let outcome = commit(&mut store, &PRODUCTS, &Submission::Delete { id })?;
        assert_eq!(outcome, CommitOutcome::Deleted(id));
        assert!(store.get(id).is_none());
        assert!(commit(&mut store, &PRODUCTS, &Submission::Delete { id }).is_err());
        Ok(())
    }

    #[test]
    fn submit_settles_modal() -> Result<()> {
        let mut store = seed_store(PageKind::Users)?;
        let mut modal = Modal::default();
        assert_eq!(submit(&mut store, &USERS, &mut modal)?, None);

        modal.open_create(&USERS);
        let draft = modal.draft_mut().expect("create draft");
        draft.set("name", "Rosa Díaz");
        draft.set("email", "juan@example.com");
        let outcome = submit(&mut store, &USERS, &mut modal)?.expect("outcome");
        assert!(!outcome.is_applied());
        assert_eq!(modal.kind(), ModalKind::Creating);
        let message = modal
            .draft()
            .and_then(|draft| draft.errors.get("email"))
            .expect("email error");
        assert!(message.contains("duplicate"));

        modal
            .draft_mut()
            .expect("draft kept")
            .set("email", "rosa@example.com");
        let outcome = submit(&mut store, &USERS, &mut modal)?.expect("outcome");
        assert!(outcome.is_applied());
        assert_eq!(modal, Modal::Closed);
        Ok(())
    }
}
