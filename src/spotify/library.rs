use crate::{
    Res,
    client::ApiRequest,
    spotify::SpotifyClient,
    types::SaveIdsRequest,
};

impl SpotifyClient {
    /// `PUT`s one batch of ids to a library endpoint. Saving an id that is
    /// already in the library is a no-op on Spotify's side.
    pub(super) async fn save_ids(
        &mut self,
        url: String,
        extra_query: Option<(&str, &str)>,
        ids: &[String],
    ) -> Res<()> {
        let mut request = ApiRequest::put(url).json(&SaveIdsRequest { ids: ids.to_vec() })?;
        if let Some((key, value)) = extra_query {
            request = request.query(key, value);
        }
        self.client.send(&request).await?;
        Ok(())
    }
}
