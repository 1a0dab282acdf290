//! In-memory control panel.
//!
//! Stands in for a page of form controls: one checkbox per boolean field,
//! one numeric input per integer field. Controls appear the first time the
//! bridge displays a value for their field.

use std::collections::BTreeMap;

use crate::traits::ControlPanel;
use crate::types::{Field, FieldKind, FieldValue};

/// The widget used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Checkbox,
    NumberInput,
}

impl ControlKind {
    pub fn for_field(field: Field) -> Self {
        match field.kind() {
            FieldKind::Bool => ControlKind::Checkbox,
            FieldKind::Int => ControlKind::NumberInput,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub kind: ControlKind,
    pub value: FieldValue,
}

#[derive(Debug, Clone, Default)]
pub struct MemPanel {
    controls: BTreeMap<Field, Control>,
}

impl MemPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&Control> {
        self.controls.get(&field)
    }

    /// Controls in field order.
    pub fn controls(&self) -> impl Iterator<Item = (Field, &Control)> {
        self.controls.iter().map(|(f, c)| (*f, c))
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    fn set(&mut self, field: Field, value: FieldValue) {
        let value = value.coerce(field.kind());
        self.controls
            .entry(field)
            .and_modify(|c| c.value = value)
            .or_insert(Control {
                kind: ControlKind::for_field(field),
                value,
            });
    }
}

impl ControlPanel for MemPanel {
    fn display(&mut self, field: Field, value: FieldValue) {
        self.set(field, value);
    }

    fn value(&self, field: Field) -> Option<FieldValue> {
        self.controls.get(&field).map(|c| c.value)
    }

    fn input(&mut self, field: Field, value: FieldValue) {
        self.set(field, value);
    }
}
