//! Activation engine: keeps at most one active mock per `(path, method)` endpoint.
//!
//! Every write that makes a mock active runs two steps against the store:
//! deactivate the whole endpoint, then activate the target. The steps are not
//! transactional. A failure in the first step aborts with nothing changed; a
//! failure in the second leaves the endpoint with no active mock until the
//! operation is retried.

use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::mock::{CreateMock, EditMock, HttpMethod, Mock, MockFields};
use crate::services::path::normalize;
use crate::store::MockStore;

/// Step one of every activation.
async fn deactivate_endpoint(
    store: &dyn MockStore,
    path: &str,
    method: HttpMethod,
) -> Result<(), AppError> {
    let touched = store.set_active_for_all(path, method, false).await?;
    tracing::debug!(path, %method, touched, "Deactivated endpoint");
    Ok(())
}

/// Register a new mock and make it the active one for its endpoint.
pub async fn create(store: &dyn MockStore, input: &CreateMock) -> Result<Mock, AppError> {
    input.check()?;

    let mock = Mock {
        id: Uuid::new_v4(),
        filter_name: input.filter_name.clone(),
        description: input.description.clone(),
        path: normalize(&input.path),
        method: input.method,
        status_code: i32::from(input.status_code),
        body: input.body.clone(),
        is_pdf: input.is_pdf,
        is_active: true,
        create_date: Utc::now(),
    };

    deactivate_endpoint(store, &mock.path, mock.method).await?;
    store.insert(&mock).await?;

    tracing::info!(id = %mock.id, path = %mock.path, method = %mock.method, "Mock created");
    Ok(mock)
}

/// Overwrite a mock in place and make it the active one for its (possibly new) endpoint.
///
/// `filter_name` is kept from the stored record.
pub async fn edit(store: &dyn MockStore, input: &EditMock) -> Result<Mock, AppError> {
    input.mock.check()?;

    if store.find_by_id(input.id).await?.is_none() {
        return Err(AppError::NotFound(format!("Mock '{}' not found", input.id)));
    }

    let fields = MockFields {
        description: input.mock.description.clone(),
        path: normalize(&input.mock.path),
        method: input.mock.method,
        status_code: i32::from(input.mock.status_code),
        body: input.mock.body.clone(),
        is_pdf: input.mock.is_pdf,
        is_active: true,
        create_date: Utc::now(),
    };

    deactivate_endpoint(store, &fields.path, fields.method).await?;
    let mock = store
        .replace(input.id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mock '{}' not found", input.id)))?;

    tracing::info!(id = %mock.id, path = %mock.path, method = %mock.method, "Mock edited");
    Ok(mock)
}

/// Make an existing mock the active one for its endpoint. Other fields are untouched.
pub async fn enable(store: &dyn MockStore, id: Uuid) -> Result<Mock, AppError> {
    let target = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mock '{id}' not found")))?;

    let (path, method) = target.endpoint();
    deactivate_endpoint(store, path, method).await?;
    let mock = store
        .set_active(id, true)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mock '{id}' not found")))?;

    tracing::info!(id = %mock.id, path = %mock.path, method = %mock.method, "Mock enabled");
    Ok(mock)
}

/// Remove a mock. Deleting the active one leaves its endpoint without an active mock.
pub async fn delete(store: &dyn MockStore, id: Uuid) -> Result<Mock, AppError> {
    let mock = store
        .delete_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mock '{id}' not found")))?;

    tracing::info!(id = %mock.id, was_active = mock.is_active, "Mock deleted");
    Ok(mock)
}
