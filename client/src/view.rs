//! Headless incremental list view.
//!
//! [`ListView`] keeps one row per record in the order records first appeared
//! and patches rows from changesets instead of rebuilding the list.

use std::fmt::Write as _;

use roster_engine::{ChangeSink, Changeset, Error, RecordId};

/// Message shown while a load run is in flight.
pub const LOADING_MESSAGE: &str = "Loading...";

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RecordId,
    pub label: String,
}

/// A list of labelled rows plus status labels.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    field: String,
    rows: Vec<Row>,
    message: Option<String>,
    error: Option<String>,
}

impl ListView {
    /// Create an empty view labelling rows with `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }

    /// Pending message, shown while loading.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Error label from the last failed run.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Render the view as plain text, one row per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{}", message);
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "error: {}", error);
        }
        for row in &self.rows {
            let _ = writeln!(out, "{}\t{}", row.id, row.label);
        }
        out
    }
}

impl ChangeSink for ListView {
    fn apply(&mut self, changeset: &Changeset) {
        self.rows.retain(|row| !changeset.removed.contains(&row.id));

        for row in self.rows.iter_mut().filter(|row| changeset.touches(&row.id)) {
            if let Some(record) = changeset.all.get(&row.id) {
                row.label = record.display(&self.field);
            }
        }

        for id in &changeset.added {
            match changeset.all.get(id) {
                Some(record) => self.rows.push(Row {
                    id: id.clone(),
                    label: record.display(&self.field),
                }),
                None => tracing::warn!(%id, "Added id missing from changeset"),
            }
        }
    }

    fn load_started(&mut self) {
        self.message = Some(LOADING_MESSAGE.to_string());
        self.error = None;
    }

    fn load_failed(&mut self, error: &Error) {
        self.error = Some(error.to_string());
    }

    fn load_completed(&mut self) {
        self.message = None;
    }
}
