//! Read-only views over the mock catalog: filter summaries and per-filter listings.

use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::mock::{FilterSummary, Mock, MockView};
use crate::store::MockStore;

/// Group mocks by filter name, most recently touched group first.
pub fn summarize(mocks: &[Mock]) -> Vec<FilterSummary> {
    let mut groups: HashMap<&str, FilterSummary> = HashMap::new();

    for mock in mocks {
        groups
            .entry(mock.filter_name.as_str())
            .and_modify(|summary| {
                summary.count += 1;
                summary.last_create_date = summary.last_create_date.max(mock.create_date);
            })
            .or_insert_with(|| FilterSummary {
                filter_name: mock.filter_name.clone(),
                count: 1,
                last_create_date: mock.create_date,
            });
    }

    let mut summaries: Vec<FilterSummary> = groups.into_values().collect();
    summaries.sort_by(|a, b| {
        b.last_create_date
            .cmp(&a.last_create_date)
            .then_with(|| a.filter_name.cmp(&b.filter_name))
    });
    summaries
}

pub async fn filters(store: &dyn MockStore) -> Result<Vec<FilterSummary>, AppError> {
    let mocks = store.find_all().await?;
    Ok(summarize(&mocks))
}

/// All mocks under one filter, tagged with the configured mock domain.
pub async fn by_filter(
    store: &dyn MockStore,
    filter_name: &str,
    domain: &str,
) -> Result<Vec<MockView>, AppError> {
    let mocks = store.find_by_filter_name(filter_name).await?;
    Ok(mocks
        .into_iter()
        .map(|mock| MockView::from_mock(mock, domain))
        .collect())
}
