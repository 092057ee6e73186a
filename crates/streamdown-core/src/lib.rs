//! `streamdown-core` provides the visual primitives shared by streamdown
//! renderers and the hosts that display their output.
//!
//! The crate is deliberately small and render-target-agnostic within the
//! terminal world: it knows about styled runs and typed visual nodes, not
//! about markup. Markup parsing and reconciliation live in
//! `streamdown-markdown`; most users should depend on the facade crate
//! `streamdown`.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive updates and drawing from your app.
//! - No async runtime: every API is a plain, finite, synchronous call.
//! - Hosts stay in control: a renderer hands back [`node::VisualNode`]
//!   handles and [`surface::SurfaceEdit`]s; the host decides how to mirror
//!   them into its own child collection.
//!
//! Useful entry points:
//! - [`theme::Theme`]: the style palette applied at render time.
//! - [`node::VisualNode`]: one rendered block, flattenable to terminal
//!   lines via [`node::VisualNode::to_lines`].
//! - [`surface::Surface`]: the positional child-collection contract a host
//!   implements (`Vec<VisualNode>` works out of the box).
pub mod node;
pub mod run;
pub mod surface;
pub mod theme;
