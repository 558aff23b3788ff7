//! Every identifier is resolved and every expression typed here, lowering the
//! syntax tree into the IR. The IR is then rewritten by the optimizer before
//! being handed to a code generator.

pub mod analyze;
pub mod context;
pub mod entity;
pub mod ir;
pub mod optimization;
pub mod pretty_print;
pub mod primitive;
pub mod stdlib;
pub mod ty;
