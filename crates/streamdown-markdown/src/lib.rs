//! Markdown block model, rendering, and incremental reconciliation.
//!
//! This crate turns markdown text into an ordered sequence of visual nodes
//! and keeps that sequence cheap to maintain while the text is replaced
//! wholesale many times per second: the token-streaming case, where an
//! assistant reply is re-parsed and re-displayed on every increment.
//!
//! ## Layers
//!
//! - [`model`] / [`parse`]: the parsed block/inline trees, keyed by the
//!   source span each block occupied.
//! - [`inline`] / [`block`]: pure renderers from parsed trees to
//!   [`streamdown_core::node::VisualNode`]s.
//! - [`reconcile`]: the index-aligned diff that decides, per block
//!   position, whether to keep, rebuild, append, or truncate.
//! - [`streaming`]: [`streaming::StreamingDocument`], the view-model most
//!   applications use. Feed it text, draw its lines.
pub mod block;
pub mod inline;
pub mod model;
pub mod parse;
pub mod reconcile;
pub mod streaming;
