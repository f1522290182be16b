// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=fieldwork_form --heading-base-level=0

//! Fieldwork Form: named, classified form controls in document order.
//!
//! Fieldwork Form is a reusable building block for anything that needs to treat a set of
//! interactive controls as data: state capture, prefill, test harnesses, headless form drivers.
//!
//! - Represents an ordered collection of controls with field names, capability classes, and flags.
//! - Answers lookups by name (same-named groups stay in document order) and by position.
//! - Mediates state updates so the name index can never drift from the stored controls.
//!
//! ## Where this fits
//!
//! The host owns markup parsing and widget rendering; this crate owns neither.
//! - Host: parses a document or builds a UI, inserting one [`Control`] per element in document order.
//! - This crate: stores the controls, classifies them once, and serves ordered queries over them.
//! - [`fieldwork_transfer`](https://docs.rs/fieldwork_transfer): moves values between a form and a
//!   flat data record under a caller-supplied scope policy.
//!
//! ## Not a widget toolkit
//!
//! This crate does not render, lay out, validate, or attach behavior to controls. A [`Control`] is
//! state only: a name, a classified value, and host flags. Controls the engine has no rule for
//! (buttons, file pickers, custom widgets) are classified [`ControlValue::Opaque`] and stay inert
//! while remaining ordinary citizens of document order.
//!
//! ## API overview
//!
//! - [`Form`]: the ordered, name-indexed control store.
//! - [`Control`]: one control; constructors per capability class.
//! - [`ControlValue`]: the closed set of capability classes with their state.
//! - [`Capability`]: the class discriminant, for cheap checks in predicates.
//! - [`ControlFlags`]: host metadata (disabled, read-only) visible to scope predicates.
//! - [`ControlId`]: generational handle of a control.
//!
//! Key operations:
//! - [`Form::insert`](Form::insert) → [`ControlId`]
//! - [`Form::control`](Form::control) / [`Form::named`](Form::named) /
//!   [`Form::by_name`](Form::by_name) / [`Form::at`](Form::at)
//! - [`Form::set_text`](Form::set_text) / [`Form::set_checked`](Form::set_checked) /
//!   [`Form::options_mut`](Form::options_mut) / [`Form::set_flags`](Form::set_flags)
//! - [`Form::controls`](Form::controls) and [`Form::ids`](Form::ids) iterate in document order.
//!
//! ## Minimal example
//!
//! ```rust
//! use fieldwork_form::{Control, Form, SelectOption};
//!
//! let mut form = Form::new();
//! let name = form.insert(Control::text("name"));
//! form.insert(Control::checkbox("subscribed"));
//! form.insert(Control::select_one(
//!     "plan",
//!     vec![SelectOption::new("free"), SelectOption::new("pro")],
//! ));
//!
//! form.set_text(name, "Ada");
//! assert_eq!(form.named("name").unwrap().text_value(), Some("Ada"));
//! assert_eq!(form.by_name("plan").len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod form;
mod types;

pub use form::Form;
pub use types::{Capability, Control, ControlFlags, ControlId, ControlValue, SelectOption};
