// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transfer passes: record into form, form into record.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use fieldwork_form::{Control, ControlId, ControlValue, Form};

use crate::policy::{FieldOverride, TransferPolicy};
use crate::record::{DataRecord, Value};
use crate::scope::resolve_scope;

/// Applies a record to the in-scope controls of a form.
///
/// Controls are grouped by name; groups are visited in first-appearance
/// order and controls within a group in document order. For each group:
///
/// - A [suppressed](TransferPolicy::suppress) name transfers nothing.
/// - A name with a [custom override](TransferPolicy::override_field) has
///   `apply` invoked with the group and the record's value list, and
///   nothing else happens for that name.
/// - Otherwise the built-in class rules run per control, where `i` is the
///   control's position within its group:
///   - text: value becomes `values[i]` rendered as text, blank when missing;
///   - checkbox: checked becomes the truthiness of `values[i]`, unchecked
///     when missing;
///   - radio: checked exactly when `values[0]` matches the option value;
///   - single select: each option selected exactly when `values[0]` matches
///     its value, so a non-matching value clears the selection;
///   - multi select: each option selected exactly when its value appears
///     anywhere in the list;
///   - opaque controls are untouched.
///
/// A name absent from the record is left alone entirely, overrides
/// included. A record name with no in-scope control is ignored. Mismatched
/// or short value lists substitute the per-class default and never error.
/// Writes are independent per field; there is no rollback, so a panicking
/// override leaves earlier writes applied.
///
/// ```rust
/// use fieldwork_form::{Control, Form};
/// use fieldwork_transfer::{DataRecord, TransferPolicy, deserialize};
///
/// let mut form = Form::new();
/// let name = form.insert(Control::text("name"));
/// form.insert(Control::checkbox("subscribed"));
///
/// let mut record = DataRecord::new();
/// record.set("name", ["Ada"]);
/// record.set("subscribed", [true]);
///
/// deserialize(&mut form, &record, &TransferPolicy::new());
/// assert_eq!(form.control(name).unwrap().text_value(), Some("Ada"));
/// assert_eq!(form.named("subscribed").unwrap().is_checked(), Some(true));
/// ```
pub fn deserialize(form: &mut Form, record: &DataRecord, policy: &TransferPolicy<'_>) {
    let scope = resolve_scope(form, policy);
    for (name, group) in name_groups(form, &scope) {
        match policy.override_for(&name) {
            Some(FieldOverride::Suppress) => {}
            Some(FieldOverride::Custom(transfer)) => {
                if let Some(values) = record.values(&name) {
                    transfer.apply(form, &group, values);
                }
            }
            None => {
                if let Some(values) = record.values(&name) {
                    for (position, id) in group.iter().enumerate() {
                        write_control(form, *id, values, position);
                    }
                }
            }
        }
    }
}

/// Reads the in-scope controls of a form into a fresh record.
///
/// The inverse of [`deserialize`], over the same grouping:
///
/// - A [suppressed](TransferPolicy::suppress) name produces no entry.
/// - A name with a [custom override](TransferPolicy::override_field) gets
///   exactly what `extract` returns, even when that is empty.
/// - Otherwise the built-in class rules push values in document order:
///   - text: the text, so a blank control still contributes an empty string;
///   - checkbox: the checked state as a flag, always;
///   - radio: the option value, only when checked;
///   - single select: the first selected option's value, if any;
///   - multi select: every selected option's value in option order;
///   - opaque controls contribute nothing.
///
/// A group that pushed no values produces no entry, so an unselected radio
/// group or empty select is absent rather than empty. Names with no
/// in-scope control never appear.
///
/// ```rust
/// use fieldwork_form::{Control, Form};
/// use fieldwork_transfer::{DataRecord, TransferPolicy, serialize};
///
/// let mut form = Form::new();
/// form.insert(Control::text("name").with_text("Ada"));
/// form.insert(Control::checkbox("subscribed").checked());
///
/// let mut expected = DataRecord::new();
/// expected.set("name", ["Ada"]);
/// expected.set("subscribed", [true]);
/// assert_eq!(serialize(&form, &TransferPolicy::new()), expected);
/// ```
pub fn serialize(form: &Form, policy: &TransferPolicy<'_>) -> DataRecord {
    let mut record = DataRecord::new();
    let scope = resolve_scope(form, policy);
    for (name, group) in name_groups(form, &scope) {
        match policy.override_for(&name) {
            Some(FieldOverride::Suppress) => {}
            Some(FieldOverride::Custom(transfer)) => {
                record.set(name, transfer.extract(form, &group));
            }
            None => {
                let mut values: SmallVec<[Value; 2]> = SmallVec::new();
                for id in &group {
                    if let Some(control) = form.control(*id) {
                        read_control(control, &mut values);
                    }
                }
                if !values.is_empty() {
                    record.set(name, values);
                }
            }
        }
    }
    record
}

/// Buckets scoped controls by name: first-appearance order across groups,
/// document order within each.
fn name_groups(form: &Form, scope: &[ControlId]) -> Vec<(String, SmallVec<[ControlId; 2]>)> {
    let mut groups: Vec<(String, SmallVec<[ControlId; 2]>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for id in scope {
        let Some(name) = form.control(*id).and_then(|c| c.name.as_deref()) else {
            continue;
        };
        match index.get(name) {
            Some(&slot) => groups[slot].1.push(*id),
            None => {
                index.insert(String::from(name), groups.len());
                let mut ids = SmallVec::new();
                ids.push(*id);
                groups.push((String::from(name), ids));
            }
        }
    }
    groups
}

/// Built-in write rule for one control at `position` within its name-group.
fn write_control(form: &mut Form, id: ControlId, values: &[Value], position: usize) {
    let Some(control) = form.control(id) else {
        return;
    };
    match &control.value {
        ControlValue::Text(_) => {
            let text = values.get(position).map(Value::to_text).unwrap_or_default();
            form.set_text(id, text);
        }
        ControlValue::Checkbox(_) => {
            let checked = values.get(position).is_some_and(Value::truthy);
            form.set_checked(id, checked);
        }
        ControlValue::Radio { value, .. } => {
            let checked = values.first().is_some_and(|v| v.matches(value));
            form.set_checked(id, checked);
        }
        ControlValue::SelectOne(_) => {
            let want = values.first();
            if let Some(options) = form.options_mut(id) {
                for option in options.iter_mut() {
                    option.selected = want.is_some_and(|v| v.matches(&option.value));
                }
            }
        }
        ControlValue::SelectMany(_) => {
            if let Some(options) = form.options_mut(id) {
                for option in options.iter_mut() {
                    option.selected = values.iter().any(|v| v.matches(&option.value));
                }
            }
        }
        ControlValue::Opaque => {}
    }
}

/// Built-in read rule for one control, pushing its values in order.
fn read_control(control: &Control, values: &mut SmallVec<[Value; 2]>) {
    match &control.value {
        ControlValue::Text(text) => values.push(Value::Text(text.clone())),
        ControlValue::Checkbox(checked) => values.push(Value::Flag(*checked)),
        ControlValue::Radio { value, checked } => {
            if *checked {
                values.push(Value::Text(value.clone()));
            }
        }
        ControlValue::SelectOne(options) => {
            if let Some(option) = options.iter().find(|o| o.selected) {
                values.push(Value::Text(option.value.clone()));
            }
        }
        ControlValue::SelectMany(options) => {
            for option in options.iter().filter(|o| o.selected) {
                values.push(Value::Text(option.value.clone()));
            }
        }
        ControlValue::Opaque => {}
    }
}
