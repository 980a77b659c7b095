//! # pimdeck
//!
//! A typed reader, validator, and writer for the XML input decks of a
//! path-integral molecular dynamics engine. A deck parametrizes an
//! external simulation program: which force-provider sockets to connect
//! to, how to integrate the equations of motion, how the ring polymer is
//! initialized, and which quantities to record. This library never runs
//! any of that; it gives those declarative documents a faithful Rust
//! data model with strict parsing and semantic checking.
//!
//! ## Architectural Philosophy
//!
//! The crate is layered so that each concern can be used on its own:
//!
//! - **[`model`]: The Data.** Plain records mirroring the document tree
//!   one-to-one — socket descriptors, emitters, integrator settings,
//!   force lists, initial conditions. Parsed once, held immutably.
//!
//! - **[`units`] and [`properties`]: The Vocabulary.** Static tables of
//!   the unit names and output quantities the dialect accepts, with the
//!   conversions and dimensions needed to check a deck against them.
//!
//! - **[`io`]: The Syntax.** A strict XML reader that rejects anything
//!   outside the dialect, with line/column positions on every error, and
//!   a writer that emits the normalized form back.
//!
//! - **[`validate`]: The Semantics.** Cross-record rules a well-formed
//!   document can still break — dangling force-field references, bead
//!   count inconsistencies, unknown output quantities — collected as a
//!   list of violations rather than a first error.

pub mod io;
pub mod model;
pub mod properties;
pub mod units;
pub mod validate;
