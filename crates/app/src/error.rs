use thiserror::Error;

use orderflow_core::DomainError;
use orderflow_infra::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by application services.
///
/// A store reporting a missing entity is folded into [`DomainError::NotFound`], so
/// callers match one variant whether the lookup or the write noticed it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failure: {0}")]
    Store(StoreError),
}

impl ServiceError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(err) => Some(err),
            ServiceError::Store(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => {
                ServiceError::Domain(DomainError::NotFound { entity, id })
            }
            other => ServiceError::Store(other),
        }
    }
}
