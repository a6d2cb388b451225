// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::forms::{Draft, FieldErrors};
use crate::ids::RecordId;
use crate::model::Record;
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Closed,
    Viewing,
    Editing,
    Deleting,
    Creating,
}

/// A focus stop inside an open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSlot {
    Field(usize),
    Confirm,
    Cancel,
    Close,
}

impl FocusSlot {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Field(_) => "",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Close => "close",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create { values: BTreeMap<String, String> },
    Update { id: RecordId, values: BTreeMap<String, String> },
    Delete { id: RecordId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(RecordId),
    Updated(RecordId),
    Deleted(RecordId),
    Rejected(FieldErrors),
}

impl CommitOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub fn message(&self, singular: &str) -> String {
        match self {
            Self::Created(id) => format!("{singular} {id} created"),
            Self::Updated(id) => format!("{singular} {id} saved"),
            Self::Deleted(id) => format!("{singular} {id} deleted"),
            Self::Rejected(errors) => format!("fix {} field(s): {errors}", errors.len()),
        }
    }
}

/// At most one modal is open; opening another replaces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Viewing {
        record: Record,
        focus: usize,
    },
    Editing {
        record: Record,
        draft: Draft,
        focus: usize,
    },
    Deleting {
        record: Record,
        focus: usize,
    },
    Creating {
        draft: Draft,
        focus: usize,
    },
}

impl Modal {
    pub fn open_view(&mut self, record: Record) {
        *self = Self::Viewing { record, focus: 0 };
    }

    pub fn open_edit(&mut self, schema: &Schema, record: Record) {
        let draft = Draft::from_record(schema, &record);
        *self = Self::Editing {
            record,
            draft,
            focus: 0,
        };
    }

    /// Focus starts on Cancel.
    pub fn open_delete(&mut self, record: Record) {
        *self = Self::Deleting { record, focus: 0 };
    }

    pub fn open_create(&mut self, schema: &Schema) {
        *self = Self::Creating {
            draft: Draft::blank(schema),
            focus: 0,
        };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Escape closes any open modal without side effects.
    pub fn escape(&mut self) -> bool {
        let was_open = self.is_open();
        self.close();
        was_open
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn kind(&self) -> ModalKind {
        match self {
            Self::Closed => ModalKind::Closed,
            Self::Viewing { .. } => ModalKind::Viewing,
            Self::Editing { .. } => ModalKind::Editing,
            Self::Deleting { .. } => ModalKind::Deleting,
            Self::Creating { .. } => ModalKind::Creating,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Viewing { record, .. }
            | Self::Editing { record, .. }
            | Self::Deleting { record, .. } => Some(record),
            Self::Closed | Self::Creating { .. } => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Editing { draft, .. } | Self::Creating { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            Self::Editing { draft, .. } | Self::Creating { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Inputs first, then buttons.
    pub fn slots(&self) -> Vec<FocusSlot> {
        match self {
            Self::Closed => Vec::new(),
            Self::Viewing { .. } => vec![FocusSlot::Close],
            Self::Deleting { .. } => vec![FocusSlot::Cancel, FocusSlot::Confirm],
            Self::Editing { draft, .. } | Self::Creating { draft, .. } => (0..draft.len())
                .map(FocusSlot::Field)
                .chain([FocusSlot::Confirm, FocusSlot::Cancel])
                .collect(),
        }
    }

    pub fn focused(&self) -> Option<FocusSlot> {
        let focus = self.focus_index()?;
        self.slots().get(focus).copied()
    }

    pub fn focused_field(&self) -> Option<usize> {
        match self.focused()? {
            FocusSlot::Field(index) => Some(index),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn focus_index(&self) -> Option<usize> {
        match self {
            Self::Closed => None,
            Self::Viewing { focus, .. }
            | Self::Editing { focus, .. }
            | Self::Deleting { focus, .. }
            | Self::Creating { focus, .. } => Some(*focus),
        }
    }

    fn set_focus(&mut self, index: usize) {
        match self {
            Self::Closed => {}
            Self::Viewing { focus, .. }
            | Self::Editing { focus, .. }
            | Self::Deleting { focus, .. }
            | Self::Creating { focus, .. } => *focus = index,
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let len = self.slots().len() as isize;
        let Some(current) = self.focus_index() else {
            return;
        };
        if len == 0 {
            return;
        }
        let next = (current as isize + delta).rem_euclid(len) as usize;
        self.set_focus(next);
    }

    pub fn submission(&self) -> Option<Submission> {
        match self {
            Self::Creating { draft, .. } => Some(Submission::Create {
                values: draft.values(),
            }),
            Self::Editing { record, draft, .. } => Some(Submission::Update {
                id: record.id,
                values: draft.values(),
            }),
            Self::Deleting { record, .. } => Some(Submission::Delete { id: record.id }),
            Self::Closed | Self::Viewing { .. } => None,
        }
    }

    /// Applied outcomes close the modal; rejections stay open with errors
    /// attached and focus on the first offending input.
    pub fn settle(&mut self, outcome: &CommitOutcome) {
        match outcome {
            CommitOutcome::Rejected(errors) => {
                let Some(draft) = self.draft_mut() else {
                    return;
                };
                draft.errors = errors.clone();
                let first = draft
                    .fields()
                    .iter()
                    .position(|field| errors.contains(field.name));
                if let Some(index) = first {
                    self.set_focus(index);
                }
            }
            _ => self.close(),
        }
    }
}
