/// Errors raised by the fallible corners of the API. The core tree operations never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An index-rooted operation on an [`ArrayTree`](crate::array::ArrayTree) named a slot past
    /// the allocated capacity.
    #[error("index {index} is outside the allocated capacity of {capacity} slots")]
    IndexOutOfRange {
        /// The requested slot.
        index: usize,
        /// How many slots are currently allocated.
        capacity: usize,
    },

    /// A traversal order name that [`Order`](crate::Order) doesn't recognize.
    #[error("unknown traversal order `{0}`")]
    UnknownOrder(String),
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
