//! Veneer Core Types and Definitions
//!
//! This crate provides the foundational model types for the Veneer API
//! surface reporter. It includes:
//!
//! - **Syntax**: resolved syntax-tree nodes and kinds ([`syntax`] module)
//! - **Spans**: the rewritable span tree mirroring a syntax subtree
//!   ([`span`] module) and its modification overlay ([`overlay`] module)
//! - **Stability**: release tags and trim levels ([`stability`] module)
//! - **Declarations**: named constructs with visibility metadata
//!   ([`declaration`] module)
//! - **Entities**: exported symbols and their export names ([`entity`] module)
//! - **Messages**: analysis messages routed into the report ([`message`] module)
//! - **Model**: the self-contained input contract for one report
//!   ([`model`] module)

pub mod declaration;
pub mod entity;
pub mod message;
pub mod model;
pub mod overlay;
pub mod span;
pub mod stability;
pub mod syntax;
