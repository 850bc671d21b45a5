use async_trait::async_trait;

use crate::{
    Res,
    client::ApiRequest,
    reconcile::SearchQuery,
    spotify::SpotifyClient,
    sync::CatalogSearch,
    types::SearchResult,
};

#[async_trait]
impl CatalogSearch for SpotifyClient {
    /// Searches a single entity kind with the field-filter syntax, e.g.
    /// `track:Song artist:Band album:Record`.
    async fn search(&mut self, query: &SearchQuery) -> Res<SearchResult> {
        let request = ApiRequest::get(self.endpoint("/search"))
            .query("q", query.to_search_string())
            .query("type", query.kind.as_str());
        self.client.get_json(&request).await
    }
}
