// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transfer policies: scope narrowing and per-field overrides.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use fieldwork_form::{Control, ControlId, Form};

use crate::record::Value;

/// A per-field transfer strategy, replacing the built-in class rules for
/// one name.
///
/// An override is handed the whole same-named in-scope group at once, in
/// document order, together with the form that owns it. Both directions are
/// covered so a field keeps one coherent strategy: whatever `apply` writes,
/// `extract` should be able to read back.
///
/// Overrides are not consulted for names outside the resolved scope.
pub trait FieldTransfer {
    /// Write direction. Called with the record's value list for the name;
    /// only called when the record contains the name.
    fn apply(&self, form: &mut Form, group: &[ControlId], values: &[Value]);

    /// Read direction. The returned list becomes the record entry for the
    /// name, verbatim (an empty list stays a present-but-empty entry).
    fn extract(&self, form: &Form, group: &[ControlId]) -> Vec<Value>;
}

/// Per-name override state inside a [`TransferPolicy`].
///
/// A name with no entry uses the built-in class rules.
pub enum FieldOverride<'f> {
    /// The explicit no-op marker: no transfer at all for the name, in
    /// either direction.
    Suppress,
    /// Delegate both directions to the given strategy.
    Custom(Box<dyn FieldTransfer + 'f>),
}

impl core::fmt::Debug for FieldOverride<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Suppress => f.write_str("Suppress"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Caller-supplied configuration for one transfer pass.
///
/// A policy narrows which controls participate (the scope) and can attach
/// per-name overrides. It is plain data scoped to a single call of
/// [`serialize`](crate::serialize), [`deserialize`](crate::deserialize),
/// or [`resolve_scope`](crate::resolve_scope); the engine itself keeps no
/// state between calls.
///
/// Scope narrowing applies four passes in a fixed order: include name-list,
/// include predicate, exclude name-list, exclude predicate. Each pass only
/// narrows, so a control is admitted exactly when it survives all four.
/// Controls with an absent or blank name are never admitted.
///
/// ```rust
/// use fieldwork_form::Control;
/// use fieldwork_transfer::TransferPolicy;
///
/// let policy = TransferPolicy::new()
///     .include(["first", "second"])
///     .exclude(["second"]);
/// assert!(policy.admits(&Control::text("first")));
/// assert!(!policy.admits(&Control::text("second")));
/// assert!(!policy.admits(&Control::text("third")));
/// ```
#[derive(Default)]
pub struct TransferPolicy<'f> {
    /// `None` admits all names; `Some` admits only the listed ones.
    include: Option<BTreeSet<String>>,
    exclude: BTreeSet<String>,
    include_filter: Option<Box<dyn Fn(&Control) -> bool + 'f>>,
    exclude_filter: Option<Box<dyn Fn(&Control) -> bool + 'f>>,
    overrides: BTreeMap<String, FieldOverride<'f>>,
}

impl core::fmt::Debug for TransferPolicy<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransferPolicy")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("include_filter", &self.include_filter.is_some())
            .field("exclude_filter", &self.exclude_filter.is_some())
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl<'f> TransferPolicy<'f> {
    /// Creates a policy that admits every named control and overrides
    /// nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the scope to the given names.
    ///
    /// The first call creates the whitelist; later calls add to it. A
    /// whitelist created from an empty iterator admits no names.
    pub fn include(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include
            .get_or_insert_with(BTreeSet::new)
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Drops the given names from the scope. Exclusion wins over every
    /// include pass.
    pub fn exclude(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Keeps only controls for which `filter` returns true. Replaces any
    /// previously set include filter.
    pub fn include_filter(mut self, filter: impl Fn(&Control) -> bool + 'f) -> Self {
        self.include_filter = Some(Box::new(filter));
        self
    }

    /// Drops controls for which `filter` returns true. Replaces any
    /// previously set exclude filter.
    pub fn exclude_filter(mut self, filter: impl Fn(&Control) -> bool + 'f) -> Self {
        self.exclude_filter = Some(Box::new(filter));
        self
    }

    /// Delegates the named field to `transfer` in both directions.
    ///
    /// Later registrations for the same name replace earlier ones.
    pub fn override_field(
        mut self,
        name: impl Into<String>,
        transfer: impl FieldTransfer + 'f,
    ) -> Self {
        self.overrides
            .insert(name.into(), FieldOverride::Custom(Box::new(transfer)));
        self
    }

    /// Marks the named field as a no-op: nothing is read or written for it,
    /// even when it is in scope.
    pub fn suppress(mut self, name: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), FieldOverride::Suppress);
        self
    }

    /// Whether a control survives all four narrowing passes.
    pub fn admits(&self, control: &Control) -> bool {
        let Some(name) = control.name.as_deref().filter(|n| !n.is_empty()) else {
            return false;
        };
        if let Some(include) = &self.include
            && !include.contains(name)
        {
            return false;
        }
        if let Some(filter) = &self.include_filter
            && !filter(control)
        {
            return false;
        }
        if self.exclude.contains(name) {
            return false;
        }
        if let Some(filter) = &self.exclude_filter
            && filter(control)
        {
            return false;
        }
        true
    }

    /// The override registered for `name`, if any.
    pub fn override_for(&self, name: &str) -> Option<&FieldOverride<'f>> {
        self.overrides.get(name)
    }
}
