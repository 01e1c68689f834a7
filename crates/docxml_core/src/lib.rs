//! Docxml core: the doc record model, member naming scheme and tree builder.
mod record;
mod signature;
mod tree;

pub use record::{DocRecord, MemberKind, ParamEntry};
pub use signature::{constructor_params, extract_call_signature, strip_semicolons};
pub use tree::{DocTree, KindCounts};
