//! `tradeloom-invoicing` — printable invoice documents.
//!
//! The storefront core's only obligation here is to hand over a complete,
//! already-priced order and the buyer's profile; everything in this crate is
//! presentation. The renderer emits a printable text stream; swapping in a
//! real PDF engine changes only this crate.

pub mod document;

pub use document::{render_invoice, InvoiceBranding};
