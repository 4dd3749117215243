//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `recordstore_core::storage`.
//! Transport-level failures (dispatch, timeout) map to `ConnectionFailed`;
//! service errors map to `QueryFailed` except for the conditional-check
//! failure on add, which is the identity conflict.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;

use recordstore_core::storage::StorageError;

fn connection_failed<E, R>(err: &SdkError<E, R>) -> StorageError
where
    E: std::error::Error,
{
    StorageError::ConnectionFailed(err.to_string())
}

/// Map a CreateTable SDK error. Returns `None` for `ResourceInUseException`:
/// the table already exists (or a concurrent caller won the provisioning
/// race), which is success for lazy provisioning.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
) -> Option<StorageError> {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(connection_failed(&err)),
        err => match err.into_service_error() {
            CreateTableError::ResourceInUseException(_) => None,
            CreateTableError::LimitExceededException(_) => Some(StorageError::QueryFailed(
                "Table limit exceeded, please retry".to_string(),
            )),
            CreateTableError::InternalServerError(_) => Some(StorageError::QueryFailed(
                "DynamoDB internal server error".to_string(),
            )),
            err => Some(StorageError::QueryFailed(format!(
                "CreateTable failed: {err:?}"
            ))),
        },
    }
}

/// Map a DescribeTable SDK error during the activation poll. Returns `None`
/// for `ResourceNotFoundException`: a freshly created table may not be
/// visible yet, so the caller keeps polling.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> Option<StorageError> {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(connection_failed(&err)),
        err => match err.into_service_error() {
            DescribeTableError::ResourceNotFoundException(_) => None,
            DescribeTableError::InternalServerError(_) => Some(StorageError::QueryFailed(
                "DynamoDB internal server error".to_string(),
            )),
            err => Some(StorageError::QueryFailed(format!(
                "DescribeTable failed: {err:?}"
            ))),
        },
    }
}

/// Map a GetItem SDK error to StorageError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StorageError {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => connection_failed(&err),
        err => match err.into_service_error() {
            GetItemError::ResourceNotFoundException(_) => {
                StorageError::QueryFailed("Table not found".to_string())
            }
            GetItemError::ProvisionedThroughputExceededException(_) => {
                StorageError::QueryFailed("Throughput exceeded, please retry".to_string())
            }
            GetItemError::RequestLimitExceeded(_) => {
                StorageError::QueryFailed("Request limit exceeded, please retry".to_string())
            }
            GetItemError::InternalServerError(_) => {
                StorageError::QueryFailed("DynamoDB internal server error".to_string())
            }
            err => StorageError::QueryFailed(format!("GetItem failed: {err:?}")),
        },
    }
}

/// Map a PutItem SDK error to StorageError. The conditional-check failure is
/// the duplicate-identity conflict.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    type_name: &'static str,
    id: impl Into<String>,
) -> StorageError {
    let id_str = id.into();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => connection_failed(&err),
        err => match err.into_service_error() {
            PutItemError::ConditionalCheckFailedException(_) => StorageError::Conflict {
                type_name,
                id: id_str,
            },
            PutItemError::ResourceNotFoundException(_) => {
                StorageError::QueryFailed("Table not found".to_string())
            }
            PutItemError::ProvisionedThroughputExceededException(_) => {
                StorageError::QueryFailed("Throughput exceeded, please retry".to_string())
            }
            PutItemError::RequestLimitExceeded(_) => {
                StorageError::QueryFailed("Request limit exceeded, please retry".to_string())
            }
            PutItemError::TransactionConflictException(_) => {
                StorageError::QueryFailed("Transaction conflict, please retry".to_string())
            }
            PutItemError::InternalServerError(_) => {
                StorageError::QueryFailed("DynamoDB internal server error".to_string())
            }
            err => StorageError::QueryFailed(format!("PutItem failed: {err:?}")),
        },
    }
}

/// Map a DeleteItem SDK error to StorageError. The delete is unconditional,
/// so a missing item never produces an error here.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> StorageError {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => connection_failed(&err),
        err => match err.into_service_error() {
            DeleteItemError::ResourceNotFoundException(_) => {
                StorageError::QueryFailed("Table not found".to_string())
            }
            DeleteItemError::ProvisionedThroughputExceededException(_) => {
                StorageError::QueryFailed("Throughput exceeded, please retry".to_string())
            }
            DeleteItemError::RequestLimitExceeded(_) => {
                StorageError::QueryFailed("Request limit exceeded, please retry".to_string())
            }
            DeleteItemError::TransactionConflictException(_) => {
                StorageError::QueryFailed("Transaction conflict, please retry".to_string())
            }
            DeleteItemError::InternalServerError(_) => {
                StorageError::QueryFailed("DynamoDB internal server error".to_string())
            }
            err => StorageError::QueryFailed(format!("DeleteItem failed: {err:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ResourceInUseException, ResourceNotFoundException,
    };
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;

    use super::*;

    fn service_error<E>(err: E) -> SdkError<E, HttpResponse> {
        SdkError::service_error(
            err,
            HttpResponse::new(
                aws_smithy_runtime_api::http::StatusCode::try_from(400).unwrap(),
                aws_smithy_types::body::SdkBody::empty(),
            ),
        )
    }

    #[test]
    fn test_conditional_check_failure_is_conflict() {
        let err = service_error(PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder().build(),
        ));

        let mapped = map_put_item_error(err, "demo", "abc");
        assert_eq!(
            mapped,
            StorageError::Conflict {
                type_name: "demo",
                id: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_resource_in_use_on_create_is_success() {
        let err = service_error(CreateTableError::ResourceInUseException(
            ResourceInUseException::builder().build(),
        ));

        assert_eq!(map_create_table_error(err), None);
    }

    #[test]
    fn test_not_found_on_describe_means_keep_polling() {
        let err = service_error(DescribeTableError::ResourceNotFoundException(
            ResourceNotFoundException::builder().build(),
        ));

        assert_eq!(map_describe_table_error(err), None);
    }
}
