//! Batteries-included facade for streamdown.
//!
//! Streamdown renders markdown into a tree of visual primitives and keeps
//! that tree cheap to maintain while the source text is replaced wholesale
//! many times per second, as when an assistant reply streams in. The core
//! idea is reconciliation: compare the previous parsed block sequence with
//! the new one, position by position, and only rebuild the nodes whose
//! source actually changed.
//!
//! Most applications only need [`streaming::StreamingDocument`]:
//!
//! ```rust
//! use streamdown::streaming::StreamingDocument;
//! use streamdown::theme::Theme;
//!
//! let mut doc = StreamingDocument::new(Theme::default());
//! doc.append("# Hello\n\nstreamed *markdo");
//! doc.append("wn*\n");
//! let lines = doc.lines(); // ratatui lines, ready to draw
//! # let _ = lines;
//! ```
//!
//! For custom hosts, the layers underneath are exposed: [`parse`] for the
//! block model, [`block`]/[`inline`] for rendering, [`reconcile`] for the
//! snapshot diff, and [`surface`] for mirroring edits into your own child
//! collection.
pub use streamdown_core::node;
pub use streamdown_core::run;
pub use streamdown_core::surface;
pub use streamdown_core::theme;
pub use streamdown_markdown::block;
pub use streamdown_markdown::inline;
pub use streamdown_markdown::model;
pub use streamdown_markdown::parse;
pub use streamdown_markdown::reconcile;
pub use streamdown_markdown::streaming;
