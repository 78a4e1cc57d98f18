//! A sample FlexFunction for an Arrow Flight function host.
//!
//! The host loads functions implementing [`plugin::FlexFun`], runs their
//! `on_load` once at startup and then serves their results over Flight RPC.
//! [`sample_function::SampleFlexFunction`] is the starting point: it declares
//! a name and a schema and returns a static table.

pub mod model;
pub mod plugin;
pub mod sample_function;

pub use sample_function::SampleFlexFunction;
