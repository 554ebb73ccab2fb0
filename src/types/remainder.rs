//! Handling of axes that do not split evenly

/// What to do when an input axis is not an exact multiple of its target length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Remainder {
    /// Fail with `RebinError::IndivisibleShape`
    #[default]
    Reject,
    /// Drop the trailing elements that do not fill a whole block
    Truncate,
}
