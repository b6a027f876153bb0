//! Post-run state queries.
//!
//! Reads the global object, prints the merchant registry, walks the NFT
//! table page by page, and finally looks up the user's NFT by address.

use serde::Serialize;
use serde_json::Value;

use crate::blockchain::client::SuiClient;
use crate::blockchain::types::{BlockchainError, DynamicFieldPage, ObjectId, ObjectRead, SuiAddress};
use crate::driver::error::{DriverError, DriverResult};
use crate::driver::pagination::paginate;
use crate::driver::publish::PublishResult;
use crate::observability::print_json;

/// Location of the merchant set inside the global object.
pub const MERCHANTS_POINTER: &str = "/data/fields/merchants/fields/contents";
/// Location of the NFT table id inside the global object.
pub const NFT_TABLE_POINTER: &str = "/data/fields/CoffeeNFTs/fields/id/id";

/// Everything the query phase observed.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub merchants: Value,
    pub nft_table_id: ObjectId,
    pub pages: usize,
    pub nfts: Vec<ObjectRead>,
    pub user_nft: ObjectRead,
}

fn required<'a>(object: &'a ObjectRead, id: &ObjectId, pointer: &str) -> DriverResult<&'a Value> {
    object.field(pointer).ok_or_else(|| DriverError::MissingField {
        object: id.clone(),
        path: pointer.to_string(),
    })
}

/// Merchant addresses registered in the global object.
pub fn merchants<'a>(global: &'a ObjectRead, id: &ObjectId) -> DriverResult<&'a Value> {
    required(global, id, MERCHANTS_POINTER)
}

/// Id of the dynamic field collection holding the NFTs.
pub fn nft_table_id(global: &ObjectRead, id: &ObjectId) -> DriverResult<ObjectId> {
    let value = required(global, id, NFT_TABLE_POINTER)?;
    value
        .as_str()
        .map(ObjectId::from)
        .ok_or_else(|| DriverError::MissingField {
            object: id.clone(),
            path: NFT_TABLE_POINTER.to_string(),
        })
}

/// Run all queries against the published package.
pub async fn run_queries(
    client: &SuiClient,
    published: &PublishResult,
    user: SuiAddress,
    page_limit: Option<usize>,
) -> DriverResult<QueryReport> {
    let global_id = &published.global_object_id;
    let global = client.get_object(global_id).await?;
    print_json("globalObject", &global);

    let merchants = merchants(&global, global_id)?.clone();
    print_json("merchants", &merchants);

    let table_id = nft_table_id(&global, global_id)?;
    tracing::info!(table_id = %table_id, "Listing coffee NFTs");

    let table = &table_id;
    let collected = paginate(
        move |cursor: Option<ObjectId>| async move {
            client.get_dynamic_fields(table, cursor.as_ref(), page_limit).await
        },
        move |page: DynamicFieldPage| async move {
            print_json("coffeeNFTs", &page);
            let mut fetched = Vec::with_capacity(page.data.len());
            for entry in &page.data {
                let object = client.get_object(&entry.object_id).await?;
                print_json("nftObject", &object);
                fetched.push(object);
            }
            Ok::<_, BlockchainError>(fetched)
        },
    )
    .await?;

    tracing::info!(
        pages = collected.pages,
        nfts = collected.items.len(),
        "NFT table walked"
    );

    let user_key = user.to_string();
    let user_nft = client.get_dynamic_field_object(&table_id, &user_key).await?;
    print_json("coffeeNFTByUser", &user_nft);

    Ok(QueryReport {
        merchants,
        nft_table_id: table_id,
        pages: collected.pages,
        nfts: collected.items,
        user_nft,
    })
}
