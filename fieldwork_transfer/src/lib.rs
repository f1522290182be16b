// Copyright 2025 the Fieldwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=fieldwork_transfer --heading-base-level=0

//! Fieldwork Transfer: move values between a form and a flat data record.
//!
//! Fieldwork Transfer is the state-transfer half of Fieldwork: given a
//! [`Form`](fieldwork_form::Form) of named controls, it applies a [`DataRecord`] to the form
//! ([`deserialize`]) or reads the form into a fresh record ([`serialize`]).
//!
//! - One [`TransferPolicy`] narrows both directions the same way: name lists, control
//!   predicates, and per-field overrides.
//! - Built-in rules cover each capability class; a [`FieldTransfer`] override replaces them for
//!   one field name without touching the rest.
//! - Transfers never fail. Unknown names, missing controls, short value lists, and opaque
//!   controls all degrade to doing less, not to errors.
//!
//! ## Where this fits
//!
//! [`fieldwork_form`] owns the controls; the host owns where their state comes from and goes to.
//! - Host: persists records (storage, URLs, test fixtures) and decides when to transfer.
//! - This crate: the transfer rules, scope policy, and the record type itself.
//!
//! ## Two subtleties worth knowing
//!
//! Same-named controls form a group. Value lists pair with a group positionally for text and
//! checkbox controls, while radio groups and selects read the list as a selection. Groups are
//! visited in first-appearance order and controls within a group in document order, so output
//! is deterministic for a given form.
//!
//! A name absent from a record means "leave the field alone"; a name present with an empty
//! value list means "reset the field". [`DataRecord`] keeps the two states distinct.
//!
//! ## API overview
//!
//! - [`DataRecord`]: flat `name → values` snapshot, ordered by name.
//! - [`Value`]: text or flag; the record's unit of exchange.
//! - [`TransferPolicy`]: builder for scope narrowing and overrides.
//! - [`FieldTransfer`] / [`FieldOverride`]: custom transfer for a single field name.
//! - [`resolve_scope`]: the shared scope rule, exposed for diagnostics.
//! - [`deserialize`] / [`serialize`]: the two passes.
//!
//! ## Minimal example
//!
//! ```rust
//! use fieldwork_form::{Control, Form};
//! use fieldwork_transfer::{DataRecord, TransferPolicy, deserialize, serialize};
//!
//! let mut form = Form::new();
//! form.insert(Control::text("name"));
//! form.insert(Control::checkbox("subscribed"));
//!
//! let mut record = DataRecord::new();
//! record.set("name", ["Ada"]);
//! record.set("subscribed", [true]);
//!
//! let policy = TransferPolicy::new();
//! deserialize(&mut form, &record, &policy);
//! assert_eq!(form.named("name").unwrap().text_value(), Some("Ada"));
//!
//! // Reading the form back reproduces the record.
//! assert_eq!(serialize(&form, &policy), record);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod policy;
mod record;
mod scope;
mod transfer;

pub use policy::{FieldOverride, FieldTransfer, TransferPolicy};
pub use record::{DataRecord, Value};
pub use scope::resolve_scope;
pub use transfer::{deserialize, serialize};
