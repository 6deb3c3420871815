//! Deterministic clinical layer. Everything here is a pure function over
//! the domain models — the numeric semantics must stay bit-for-bit stable
//! across versions, so no formula or threshold is configurable.

pub mod age;
pub mod anthropometry;
pub mod indication;
pub mod kinetics;
pub mod renal;
