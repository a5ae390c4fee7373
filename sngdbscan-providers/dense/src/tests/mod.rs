pub(crate) use super::{DenseMatrixProvider, DenseMatrixProviderError};

mod support;
