// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core form store: document order, name index, mediated state updates.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::{Control, ControlFlags, ControlId, SelectOption};

/// An ordered collection of named controls.
///
/// The host parses whatever markup or UI description it has and inserts one
/// [`Control`] per interactive element, in document order. The form then
/// answers the queries the transfer layer needs: iteration in document
/// order, positional access, and same-named group lookup.
///
/// Control identifiers are generational: after [`Form::remove`], the old
/// [`ControlId`] is stale and every accessor treats it as absent. State
/// updates go through the `set_*` methods so the name index can never drift
/// from the stored controls.
///
/// ## Example
///
/// ```rust
/// use fieldwork_form::{Control, Form};
///
/// let mut form = Form::new();
/// let name = form.insert(Control::text("name"));
/// form.insert(Control::checkbox("subscribed"));
///
/// form.set_text(name, "Ada");
/// assert_eq!(form.control(name).unwrap().text_value(), Some("Ada"));
/// assert_eq!(form.len(), 2);
/// ```
pub struct Form {
    /// slots
    slots: Vec<Option<Slot>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// live controls in document order
    order: Vec<ControlId>,
    /// name -> same-named live controls, document order
    names: HashMap<String, SmallVec<[ControlId; 2]>>,
}

impl core::fmt::Debug for Form {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Form")
            .field("slots_total", &self.slots.len())
            .field("controls_alive", &self.order.len())
            .field("free_list", &self.free_list.len())
            .field("names", &self.names.len())
            .finish_non_exhaustive()
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    control: Control,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Appends a control in document order and returns its identifier.
    pub fn insert(&mut self, control: Control) -> ControlId {
        let name = control.name.clone();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            debug_assert!(
                self.slots[idx].is_none(),
                "free-list entry points at an occupied slot"
            );
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot {
                generation,
                control,
            });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ControlId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot {
                generation,
                control,
            }));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ControlId uses 32-bit indices by design."
            )]
            ((self.slots.len() - 1) as u32, generation)
        };
        let id = ControlId::new(idx, generation);
        self.order.push(id);
        if let Some(name) = name {
            self.names.entry(name).or_default().push(id);
        }
        id
    }

    /// Removes a control and returns it.
    ///
    /// The identifier becomes stale immediately; its slot may be reused by a
    /// later insertion under a bumped generation. Returns `None` for stale
    /// identifiers.
    pub fn remove(&mut self, id: ControlId) -> Option<Control> {
        if !self.is_alive(id) {
            return None;
        }
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        self.order.retain(|c| *c != id);
        if let Some(name) = slot.control.name.as_deref() {
            if let Some(ids) = self.names.get_mut(name) {
                ids.retain(|c| *c != id);
                if ids.is_empty() {
                    self.names.remove(name);
                }
            }
        }
        Some(slot.control)
    }

    /// Number of live controls.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the form has no live controls.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Read access to a control. Returns `None` for stale identifiers.
    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.slot_opt(id).map(|s| &s.control)
    }

    /// The first control carrying `name`, if any.
    pub fn named(&self, name: &str) -> Option<&Control> {
        let id = *self.names.get(name)?.first()?;
        self.control(id)
    }

    /// All controls carrying `name`, in document order. Unknown names yield
    /// an empty slice.
    pub fn by_name(&self, name: &str) -> &[ControlId] {
        self.names.get(name).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    /// The control at `position` in document order.
    pub fn at(&self, position: usize) -> Option<ControlId> {
        self.order.get(position).copied()
    }

    /// Live control identifiers in document order.
    pub fn ids(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.order.iter().copied()
    }

    /// Live controls with their identifiers, in document order.
    pub fn controls(&self) -> impl Iterator<Item = (ControlId, &Control)> + '_ {
        self.order.iter().map(|id| (*id, &self.slot(*id).control))
    }

    /// Sets the text value of a text-class control.
    ///
    /// Returns false for stale identifiers and for controls of other
    /// classes, leaving the control untouched.
    pub fn set_text(&mut self, id: ControlId, text: impl Into<String>) -> bool {
        if let Some(s) = self.slot_opt_mut(id) {
            s.control.set_text(text)
        } else {
            false
        }
    }

    /// Sets the checked state of a checkbox or radio control.
    ///
    /// Returns false for stale identifiers and for classes without a
    /// checked state.
    pub fn set_checked(&mut self, id: ControlId, checked: bool) -> bool {
        if let Some(s) = self.slot_opt_mut(id) {
            s.control.set_checked(checked)
        } else {
            false
        }
    }

    /// Mutable access to a select container's options.
    ///
    /// The slice form allows toggling selection without touching the
    /// control's name or class. Non-select classes yield an empty slice;
    /// stale identifiers yield `None`.
    pub fn options_mut(&mut self, id: ControlId) -> Option<&mut [SelectOption]> {
        self.slot_opt_mut(id).map(|s| s.control.options_mut())
    }

    /// The flags of a control if the identifier is live.
    pub fn flags(&self, id: ControlId) -> Option<ControlFlags> {
        self.slot_opt(id).map(|s| s.control.flags)
    }

    /// Replaces the flags of a control. Returns false for stale identifiers.
    pub fn set_flags(&mut self, id: ControlId, flags: ControlFlags) -> bool {
        if let Some(s) = self.slot_opt_mut(id) {
            s.control.flags = flags;
            true
        } else {
            false
        }
    }

    // --- internals ---

    /// Returns true if `id` refers to a live control.
    ///
    /// A `ControlId` is considered live if its slot exists and its
    /// generation matches the current generation stored in that slot.
    pub fn is_alive(&self, id: ControlId) -> bool {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .map(|s| s.generation == id.1)
            .unwrap_or(false)
    }

    /// Access a slot known to be live; panics if `id` is stale.
    fn slot(&self, id: ControlId) -> &Slot {
        self.slots[id.idx()].as_ref().expect("dangling ControlId")
    }

    fn slot_opt(&self, id: ControlId) -> Option<&Slot> {
        let s = self.slots.get(id.idx())?.as_ref()?;
        if s.generation != id.1 {
            return None;
        }
        Some(s)
    }

    fn slot_opt_mut(&mut self, id: ControlId) -> Option<&mut Slot> {
        let s = self.slots.get_mut(id.idx())?.as_mut()?;
        if s.generation != id.1 {
            return None;
        }
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Capability, ControlValue};
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn insert_preserves_document_order() {
        let mut form = Form::new();
        let a = form.insert(Control::text("a"));
        let b = form.insert(Control::checkbox("b"));
        let c = form.insert(Control::text("c"));

        assert_eq!(form.len(), 3);
        assert_eq!(form.ids().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(form.at(1), Some(b));
        assert_eq!(form.at(3), None);
    }

    #[test]
    fn by_name_groups_in_document_order() {
        let mut form = Form::new();
        let first = form.insert(Control::checkbox("pets"));
        form.insert(Control::text("other"));
        let second = form.insert(Control::checkbox("pets"));

        assert_eq!(form.by_name("pets"), &[first, second]);
        assert!(form.by_name("missing").is_empty());
    }

    #[test]
    fn named_returns_first_match() {
        let mut form = Form::new();
        form.insert(Control::radio("choice", "a"));
        form.insert(Control::radio("choice", "b"));

        let control = form.named("choice").unwrap();
        assert_eq!(control.value, ControlValue::Radio {
            value: "a".into(),
            checked: false,
        });
    }

    #[test]
    fn remove_makes_id_stale() {
        let mut form = Form::new();
        let a = form.insert(Control::text("a"));
        let b = form.insert(Control::text("b"));

        let removed = form.remove(a).unwrap();
        assert_eq!(removed.name.as_deref(), Some("a"));

        assert!(!form.is_alive(a));
        assert!(form.control(a).is_none());
        assert!(!form.set_text(a, "x"));
        assert!(form.by_name("a").is_empty());
        assert_eq!(form.ids().collect::<Vec<_>>(), vec![b]);
        assert!(form.remove(a).is_none());
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut form = Form::new();
        let a = form.insert(Control::text("a"));
        form.remove(a);
        let b = form.insert(Control::text("b"));

        // The slot is reused but the stale id stays dead.
        assert!(!form.is_alive(a));
        assert!(form.is_alive(b));
        assert_ne!(a, b);
        assert_eq!(form.len(), 1);
        assert_eq!(form.named("b").unwrap().capability(), Capability::Text);
    }

    #[test]
    fn reused_slot_appends_at_end_of_document_order() {
        let mut form = Form::new();
        let a = form.insert(Control::text("a"));
        let b = form.insert(Control::text("b"));
        form.remove(a);
        let c = form.insert(Control::text("c"));

        assert_eq!(form.ids().collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn set_text_respects_class_and_liveness() {
        let mut form = Form::new();
        let text = form.insert(Control::text("t"));
        let check = form.insert(Control::checkbox("c"));

        assert!(form.set_text(text, "hello"));
        assert!(!form.set_text(check, "hello"));
        assert_eq!(form.control(text).unwrap().text_value(), Some("hello"));
        assert_eq!(form.control(check).unwrap().is_checked(), Some(false));
    }

    #[test]
    fn options_mut_toggles_selection() {
        let mut form = Form::new();
        let select = form.insert(Control::select_many(
            "s",
            vec![SelectOption::new("a"), SelectOption::new("b")],
        ));

        let options = form.options_mut(select).unwrap();
        options[1].selected = true;
        assert_eq!(form.control(select).unwrap().selected_values(), vec!["b"]);

        let text = form.insert(Control::text("t"));
        assert!(form.options_mut(text).unwrap().is_empty());
    }

    #[test]
    fn flags_survive_round_trip() {
        let mut form = Form::new();
        let id = form.insert(Control::text("t"));
        assert_eq!(form.flags(id), Some(ControlFlags::empty()));

        assert!(form.set_flags(id, ControlFlags::DISABLED));
        assert_eq!(form.flags(id), Some(ControlFlags::DISABLED));

        form.remove(id);
        assert_eq!(form.flags(id), None);
        assert!(!form.set_flags(id, ControlFlags::empty()));
    }

    #[test]
    fn unnamed_controls_are_not_indexed() {
        let mut form = Form::new();
        let id = form.insert(Control::default());
        assert!(form.is_alive(id));
        assert!(form.by_name("").is_empty());
        assert_eq!(form.controls().count(), 1);
    }
}
