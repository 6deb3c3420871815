//! glica-export
//!
//! Printable patient care-plan document: a pure presentation transform
//! over already-computed patient data, conduct, and handout text. The
//! browser does the actual printing; nothing here touches disk or network.

pub mod error;
pub mod format;
pub mod render;
