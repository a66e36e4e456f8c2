//! In-process mock store, used by tests and `STORE_BACKEND=memory`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::mock::{HttpMethod, Mock, MockFields};
use crate::store::MockStore;

#[derive(Debug, Default)]
pub struct InMemoryMockStore {
    mocks: RwLock<Vec<Mock>>,
}

impl InMemoryMockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, then lowest id, matching the Postgres ordering.
fn listing_order(a: &Mock, b: &Mock) -> std::cmp::Ordering {
    b.create_date
        .cmp(&a.create_date)
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl MockStore for InMemoryMockStore {
    async fn find_all(&self) -> Result<Vec<Mock>, AppError> {
        let mut all = self.mocks.read().await.clone();
        all.sort_by(listing_order);
        Ok(all)
    }

    async fn find_by_filter_name(&self, filter_name: &str) -> Result<Vec<Mock>, AppError> {
        let mut found: Vec<Mock> = self
            .mocks
            .read()
            .await
            .iter()
            .filter(|m| m.filter_name == filter_name)
            .cloned()
            .collect();
        found.sort_by(listing_order);
        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mock>, AppError> {
        Ok(self.mocks.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn find_active_by_path_and_method(
        &self,
        path: &str,
        method: HttpMethod,
    ) -> Result<Option<Mock>, AppError> {
        Ok(self
            .mocks
            .read()
            .await
            .iter()
            .filter(|m| m.is_active && m.path == path && m.method == method)
            .min_by(|a, b| listing_order(a, b))
            .cloned())
    }

    async fn insert(&self, mock: &Mock) -> Result<(), AppError> {
        let mut mocks = self.mocks.write().await;
        if mocks.iter().any(|m| m.id == mock.id) {
            return Err(AppError::Conflict(format!(
                "Mock with id '{}' already exists",
                mock.id
            )));
        }
        mocks.push(mock.clone());
        Ok(())
    }

    async fn replace(&self, id: Uuid, fields: &MockFields) -> Result<Option<Mock>, AppError> {
        let mut mocks = self.mocks.write().await;
        let Some(mock) = mocks.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        mock.description = fields.description.clone();
        mock.path = fields.path.clone();
        mock.method = fields.method;
        mock.status_code = fields.status_code;
        mock.body = fields.body.clone();
        mock.is_pdf = fields.is_pdf;
        mock.is_active = fields.is_active;
        mock.create_date = fields.create_date;

        Ok(Some(mock.clone()))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<Mock>, AppError> {
        let mut mocks = self.mocks.write().await;
        Ok(mocks.iter_mut().find(|m| m.id == id).map(|mock| {
            mock.is_active = active;
            mock.clone()
        }))
    }

    async fn set_active_for_all(
        &self,
        path: &str,
        method: HttpMethod,
        active: bool,
    ) -> Result<u64, AppError> {
        let mut mocks = self.mocks.write().await;
        let mut touched = 0;
        for mock in mocks
            .iter_mut()
            .filter(|m| m.path == path && m.method == method)
        {
            mock.is_active = active;
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Mock>, AppError> {
        let mut mocks = self.mocks.write().await;
        Ok(mocks
            .iter()
            .position(|m| m.id == id)
            .map(|index| mocks.remove(index)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn mock(path: &str, method: HttpMethod, active: bool) -> Mock {
        Mock {
            id: Uuid::new_v4(),
            filter_name: "orders".to_string(),
            description: "test".to_string(),
            path: path.to_string(),
            method,
            status_code: 200,
            body: Some(json!({"ok": true})),
            is_pdf: false,
            is_active: active,
            create_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = InMemoryMockStore::new();
        let m = mock("/a", HttpMethod::Get, true);
        store.insert(&m).await.unwrap();

        let err = store.insert(&m).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn active_lookup_matches_exactly() {
        let store = InMemoryMockStore::new();
        store.insert(&mock("/a", HttpMethod::Get, true)).await.unwrap();
        store.insert(&mock("/b", HttpMethod::Get, false)).await.unwrap();

        assert!(store
            .find_active_by_path_and_method("/a", HttpMethod::Get)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_active_by_path_and_method("/A", HttpMethod::Get)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_active_by_path_and_method("/a", HttpMethod::Post)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_active_by_path_and_method("/b", HttpMethod::Get)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn several_actives_resolve_deterministically() {
        let store = InMemoryMockStore::new();
        let mut older = mock("/dup", HttpMethod::Get, true);
        older.create_date = Utc::now() - Duration::minutes(5);
        let newer = mock("/dup", HttpMethod::Get, true);
        store.insert(&newer).await.unwrap();
        store.insert(&older).await.unwrap();

        for _ in 0..3 {
            let found = store
                .find_active_by_path_and_method("/dup", HttpMethod::Get)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(found.id, newer.id);
        }
    }

    #[tokio::test]
    async fn bulk_deactivation_touches_only_the_endpoint() {
        let store = InMemoryMockStore::new();
        store.insert(&mock("/a", HttpMethod::Get, true)).await.unwrap();
        store.insert(&mock("/a", HttpMethod::Get, true)).await.unwrap();
        let other = mock("/a", HttpMethod::Post, true);
        store.insert(&other).await.unwrap();

        let touched = store
            .set_active_for_all("/a", HttpMethod::Get, false)
            .await
            .unwrap();
        assert_eq!(touched, 2);

        let other = store.find_by_id(other.id).await.unwrap().unwrap();
        assert!(other.is_active);
    }

    #[tokio::test]
    async fn replace_preserves_identity_and_filter() {
        let store = InMemoryMockStore::new();
        let original = mock("/a", HttpMethod::Get, false);
        store.insert(&original).await.unwrap();

        let fields = MockFields {
            description: "changed".to_string(),
            path: "/b".to_string(),
            method: HttpMethod::Put,
            status_code: 202,
            body: None,
            is_pdf: true,
            is_active: true,
            create_date: Utc::now(),
        };
        let updated = store.replace(original.id, &fields).await.unwrap().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.filter_name, original.filter_name);
        assert_eq!(updated.path, "/b");
        assert_eq!(updated.method, HttpMethod::Put);
        assert!(updated.body.is_none());

        assert!(store.replace(Uuid::new_v4(), &fields).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let store = InMemoryMockStore::new();
        let m = mock("/a", HttpMethod::Delete, true);
        store.insert(&m).await.unwrap();

        let removed = store.delete_by_id(m.id).await.unwrap().unwrap();
        assert_eq!(removed.id, m.id);
        assert!(store.find_all().await.unwrap().is_empty());
        assert!(store.delete_by_id(m.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn filter_listing_is_newest_first() {
        let store = InMemoryMockStore::new();
        let mut old = mock("/a", HttpMethod::Get, true);
        old.create_date = Utc::now() - Duration::hours(1);
        let new = mock("/b", HttpMethod::Get, true);
        let mut foreign = mock("/c", HttpMethod::Get, true);
        foreign.filter_name = "payments".to_string();
        store.insert(&old).await.unwrap();
        store.insert(&new).await.unwrap();
        store.insert(&foreign).await.unwrap();

        let listed = store.find_by_filter_name("orders").await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }
}
