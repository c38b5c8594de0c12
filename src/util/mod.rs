//! Helpers shared by the components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps storage error handling out of the component code so each component
//! only deals in typed values.

pub mod theme_store;
