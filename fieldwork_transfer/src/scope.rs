// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scope resolution: which controls a transfer pass may touch.

use alloc::vec::Vec;

use fieldwork_form::{ControlId, Form};

use crate::policy::TransferPolicy;

/// Resolves the controls a transfer pass will operate on.
///
/// The starting population is every control whose name is present and
/// non-blank. The policy then narrows it in a fixed order: include
/// name-list, include predicate, exclude name-list, exclude predicate.
/// Document order is preserved. An empty result is valid; the transfer
/// passes treat it as "touch nothing".
///
/// Controls outside the returned scope are guaranteed untouched by
/// [`deserialize`](crate::deserialize) and invisible to
/// [`serialize`](crate::serialize).
///
/// ```rust
/// use fieldwork_form::{Control, Form};
/// use fieldwork_transfer::{TransferPolicy, resolve_scope};
///
/// let mut form = Form::new();
/// let first = form.insert(Control::text("first"));
/// form.insert(Control::text("second"));
///
/// let scope = resolve_scope(&form, &TransferPolicy::new().exclude(["second"]));
/// assert_eq!(scope, vec![first]);
/// ```
pub fn resolve_scope(form: &Form, policy: &TransferPolicy<'_>) -> Vec<ControlId> {
    form.controls()
        .filter(|(_, control)| policy.admits(control))
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use fieldwork_form::{Capability, Control, ControlFlags};

    #[test]
    fn default_scope_is_all_named_controls() {
        let mut form = Form::new();
        let a = form.insert(Control::text("a"));
        form.insert(Control::text(""));
        form.insert(Control::default());
        let b = form.insert(Control::checkbox("b"));

        assert_eq!(resolve_scope(&form, &TransferPolicy::new()), vec![a, b]);
    }

    #[test]
    fn scope_preserves_document_order() {
        let mut form = Form::new();
        let c = form.insert(Control::text("c"));
        let a = form.insert(Control::text("a"));
        let b = form.insert(Control::text("b"));

        let policy = TransferPolicy::new().include(["a", "b", "c"]);
        assert_eq!(resolve_scope(&form, &policy), vec![c, a, b]);
    }

    #[test]
    fn narrowing_passes_compose() {
        let mut form = Form::new();
        let keep = form.insert(Control::text("keep"));
        form.insert(Control::text("keep_disabled").with_flags(ControlFlags::DISABLED));
        form.insert(Control::text("listed_out"));
        form.insert(Control::checkbox("keep_box"));

        let policy = TransferPolicy::new()
            .include(["keep", "keep_disabled", "keep_box"])
            .include_filter(|c| c.capability() == Capability::Text)
            .exclude_filter(|c| c.flags.contains(ControlFlags::DISABLED));

        assert_eq!(resolve_scope(&form, &policy), vec![keep]);
    }

    #[test]
    fn empty_scope_is_valid() {
        let mut form = Form::new();
        form.insert(Control::text("only"));

        let policy = TransferPolicy::new().exclude(["only"]);
        assert!(resolve_scope(&form, &policy).is_empty());
    }

    #[test]
    fn same_named_controls_all_survive() {
        let mut form = Form::new();
        let first = form.insert(Control::radio("choice", "a"));
        let second = form.insert(Control::radio("choice", "b"));

        assert_eq!(
            resolve_scope(&form, &TransferPolicy::new()),
            vec![first, second]
        );
    }
}
