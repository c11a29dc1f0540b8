/// Views Module
///
/// Turns fetched records into display-ready structures:
/// - events: the paginated events list
/// - detail: record to detail-panel mappers
/// - field: renderable values and ordered detail items
/// - pagination: page controls for lists
pub mod detail;
pub mod events;
pub mod field;
pub mod pagination;

use crate::api::{fetch, IndexerApi};
use crate::config::ChainSetting;
use crate::error::ApiError;
use crate::models::{Account, Block, Call, Event, Extrinsic};
use crate::route::Route;
use detail::{
    to_account_detail_item, to_block_detail_item, to_call_detail_item, to_event_detail_item,
    to_extrinsic_detail_item,
};
use field::DetailItems;

/// A single-record page; `items` is `None` when the indexer has no such record
#[derive(Debug, Clone)]
pub struct DetailPage {
    pub title: String,
    pub route: Route,
    pub items: Option<DetailItems>,
}

fn title_for(route: &Route) -> String {
    match route {
        Route::Events { .. } => "Events".to_string(),
        Route::Event(id) => format!("Event #{}", id),
        Route::Block(height) => format!("Block #{}", height),
        Route::Extrinsic(id) => format!("Extrinsic #{}", id),
        Route::Call(id) => format!("Call #{}", id),
        Route::Account(address) => format!("Account {}", address),
    }
}

/// Fetch the record behind a detail route and map it into detail items
pub async fn load_detail<A>(api: &A, route: &Route, chain: &ChainSetting) -> Result<DetailPage, ApiError>
where
    A: IndexerApi + ?Sized,
{
    let path = route.api_path();

    let items = match route {
        Route::Block(_) => fetch::<Block, _>(api, &path, &[]).await?.result.map(|b| to_block_detail_item(&b)),
        Route::Event(_) => fetch::<Event, _>(api, &path, &[]).await?.result.map(|e| to_event_detail_item(&e)),
        Route::Extrinsic(_) => {
            fetch::<Extrinsic, _>(api, &path, &[]).await?.result.map(|e| to_extrinsic_detail_item(&e))
        }
        Route::Call(_) => fetch::<Call, _>(api, &path, &[])
            .await?
            .result
            .map(|c| to_call_detail_item(Some(c.indexer()), c.section.as_deref(), c.method.as_deref())),
        Route::Account(address) => fetch::<Account, _>(api, &path, &[])
            .await?
            .result
            .map(|a| to_account_detail_item(address, Some(&a), chain)),
        Route::Events { .. } => None,
    };

    tracing::info!("Loaded {} ({})", route, if items.is_some() { "found" } else { "not found" });

    Ok(DetailPage { title: title_for(route), route: route.clone(), items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeIndexer;
    use crate::route::CompositeId;
    use field::Field;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_block_detail() {
        let api = FakeIndexer::new().respond("/blocks/100", json!({ "height": 100, "parentHash": "0x99" }));

        let page = load_detail(&api, &Route::Block(100), &ChainSetting::default()).await.unwrap();
        let items = page.items.unwrap();

        assert_eq!(page.title, "Block #100");
        assert_eq!(
            items.get("Parent Hash"),
            Some(&Field::Copyable { text: Some("0x99".to_string()), to: Some("/block/99".to_string()) })
        );
    }

    #[tokio::test]
    async fn test_load_call_detail() {
        let api = FakeIndexer::new().respond(
            "/calls/5-2",
            json!({ "indexer": { "blockHeight": 5, "callIndex": 2 }, "section": "utility", "method": "batch" }),
        );

        let page = load_detail(&api, &Route::Call(CompositeId::new(5, 2)), &ChainSetting::default()).await.unwrap();
        assert_eq!(page.items.unwrap().get("Call"), Some(&Field::text("utility(batch)")));
    }

    #[tokio::test]
    async fn test_load_account_uses_chain_setting() {
        let api = FakeIndexer::new()
            .respond("/accounts/5Grw", json!({ "data": { "free": "1500000000000" }, "nonce": 1 }));
        let chain = ChainSetting { decimals: 12, symbol: "KSM".to_string() };

        let page = load_detail(&api, &Route::Account("5Grw".to_string()), &chain).await.unwrap();
        assert_eq!(
            page.items.unwrap().get("Free"),
            Some(&Field::Balance { tooltip: Some("1.5 KSM".to_string()), display: Some("1.5 KSM".to_string()) })
        );
    }

    #[tokio::test]
    async fn test_missing_record() {
        let api = FakeIndexer::new().respond_empty("/extrinsics/9-9");

        let page =
            load_detail(&api, &Route::Extrinsic(CompositeId::new(9, 9)), &ChainSetting::default()).await.unwrap();
        assert!(page.items.is_none());
    }

    #[tokio::test]
    async fn test_http_error_propagates() {
        let api = FakeIndexer::new().fail("/events/1-1", 503);

        let result = load_detail(&api, &Route::Event(CompositeId::new(1, 1)), &ChainSetting::default()).await;
        assert!(matches!(result, Err(ApiError::Status { status: 503, .. })));
    }
}
