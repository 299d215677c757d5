//! MESI coherence states.

/// Modified, Exclusive, Shared, or Invalid.
///
/// Numeric values match the wire encoding used by `tsram` dumps:
/// Invalid=0, Shared=1, Exclusive=2, Modified=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MesiState {
    Invalid = 0,
    Shared = 1,
    Exclusive = 2,
    Modified = 3,
}
