// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the form model: control identifiers, flags, and control state.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a control in a [`Form`](crate::Form) (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ControlId(pub(crate) u32, pub(crate) u32);

impl ControlId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Host-visible control metadata.
    ///
    /// The transfer engine never branches on these; they exist so scope
    /// predicates can match on them (for example, excluding disabled
    /// controls from a save).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ControlFlags: u8 {
        /// Control is disabled in the host UI.
        const DISABLED  = 0b0000_0001;
        /// Control is read-only in the host UI.
        const READ_ONLY = 0b0000_0010;
    }
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// One option inside a select container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    /// The option's value, as submitted when selected.
    pub value: String,
    /// Whether the option is currently selected.
    pub selected: bool,
}

impl SelectOption {
    /// Creates an unselected option with the given value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selected: false,
        }
    }
}

/// The capability class of a control, carrying that class's state.
///
/// The class is fixed when the control is classified (constructed); the
/// transfer engine dispatches on it and never reclassifies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlValue {
    /// A single free-text value (text boxes, text areas, and kin).
    Text(String),
    /// An independent boolean toggle.
    Checkbox(bool),
    /// One option of a mutually exclusive same-named group.
    Radio {
        /// The value this option contributes when checked.
        value: String,
        /// Whether this option is currently checked.
        checked: bool,
    },
    /// An option container with at most one selected entry.
    SelectOne(Vec<SelectOption>),
    /// An option container with any subset of entries selected.
    SelectMany(Vec<SelectOption>),
    /// A control the engine has no transfer rule for (buttons, file
    /// pickers, custom widgets). Inert: never read, never written, but
    /// still present in document order and visible to scope predicates.
    Opaque,
}

impl ControlValue {
    /// The capability discriminant for this state.
    pub const fn capability(&self) -> Capability {
        match self {
            Self::Text(_) => Capability::Text,
            Self::Checkbox(_) => Capability::Checkbox,
            Self::Radio { .. } => Capability::Radio,
            Self::SelectOne(_) => Capability::SelectOne,
            Self::SelectMany(_) => Capability::SelectMany,
            Self::Opaque => Capability::Opaque,
        }
    }
}

/// Capability class discriminant, for cheap classification queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Free-text control.
    Text,
    /// Boolean toggle.
    Checkbox,
    /// Mutually exclusive option.
    Radio,
    /// Single-select option container.
    SelectOne,
    /// Multi-select option container.
    SelectMany,
    /// No transfer rule.
    Opaque,
}

/// A form control: an optional field name, classified state, and flags.
///
/// Controls with an absent or blank name are legal citizens of a form but
/// are permanently outside any transfer scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    /// Field name. `None` and `Some("")` both mean "never in scope".
    pub name: Option<String>,
    /// Classified state.
    pub value: ControlValue,
    /// Host metadata, visible to scope predicates.
    pub flags: ControlFlags,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            name: None,
            value: ControlValue::Opaque,
            flags: ControlFlags::default(),
        }
    }
}

impl Control {
    /// Creates a named free-text control with a blank value.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: ControlValue::Text(String::new()),
            flags: ControlFlags::default(),
        }
    }

    /// Creates a named, unchecked checkbox.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: ControlValue::Checkbox(false),
            flags: ControlFlags::default(),
        }
    }

    /// Creates a named, unchecked radio option contributing `value` when
    /// checked.
    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: ControlValue::Radio {
                value: value.into(),
                checked: false,
            },
            flags: ControlFlags::default(),
        }
    }

    /// Creates a named single-select container over `options`.
    pub fn select_one(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            name: Some(name.into()),
            value: ControlValue::SelectOne(options),
            flags: ControlFlags::default(),
        }
    }

    /// Creates a named multi-select container over `options`.
    pub fn select_many(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            name: Some(name.into()),
            value: ControlValue::SelectMany(options),
            flags: ControlFlags::default(),
        }
    }

    /// Creates a named control with no transfer rule.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: ControlValue::Opaque,
            flags: ControlFlags::default(),
        }
    }

    /// Replaces the flags, builder style.
    pub fn with_flags(mut self, flags: ControlFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the text value, builder style. No-op on non-text classes.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Marks a checkbox or radio as checked, builder style. No-op on other
    /// classes.
    pub fn checked(mut self) -> Self {
        self.set_checked(true);
        self
    }

    /// The control's capability class.
    pub const fn capability(&self) -> Capability {
        self.value.capability()
    }

    /// The current text value, for text-class controls.
    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            ControlValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Sets the text value. Returns false (and leaves the control
    /// untouched) for non-text classes.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.value {
            ControlValue::Text(v) => {
                *v = text.into();
                true
            }
            _ => false,
        }
    }

    /// The checked state, for checkbox and radio controls.
    pub fn is_checked(&self) -> Option<bool> {
        match &self.value {
            ControlValue::Checkbox(checked) | ControlValue::Radio { checked, .. } => Some(*checked),
            _ => None,
        }
    }

    /// Sets the checked state. Returns false for classes without one.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        match &mut self.value {
            ControlValue::Checkbox(c) | ControlValue::Radio { checked: c, .. } => {
                *c = checked;
                true
            }
            _ => false,
        }
    }

    /// The contained options, for select containers. Empty for other
    /// classes.
    pub fn options(&self) -> &[SelectOption] {
        match &self.value {
            ControlValue::SelectOne(options) | ControlValue::SelectMany(options) => options,
            _ => &[],
        }
    }

    /// Mutable access to the contained options, for select containers.
    pub fn options_mut(&mut self) -> &mut [SelectOption] {
        match &mut self.value {
            ControlValue::SelectOne(options) | ControlValue::SelectMany(options) => options,
            _ => &mut [],
        }
    }

    /// The values of all currently selected options, in option order.
    pub fn selected_values(&self) -> Vec<&str> {
        self.options()
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect()
    }
}
