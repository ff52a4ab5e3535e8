//! Wallets sub-client: consolidation and unspent listing.

use futures_util::Stream;
use tokio_util::sync::CancellationToken;

use crate::client::BitGoClient;
use crate::domain::wallet::wire::{ConsolidateParams, TxInfo, UnspentList, PREV_ID_PARAM};
use crate::error::SdkError;
use crate::shared::QueryParams;

pub struct Wallets<'a> {
    pub(crate) client: &'a BitGoClient,
}

impl<'a> Wallets<'a> {
    /// Coalesce the unspents held in a wallet into a smaller number.
    ///
    /// Exactly one attempt per call; no idempotency key is sent, so repeating
    /// a failed call is the caller's decision.
    pub async fn consolidate(
        &self,
        ctx: &CancellationToken,
        wallet_id: &str,
        params: Option<&ConsolidateParams>,
    ) -> Result<TxInfo, SdkError> {
        let path = format!(
            "wallet/{}/consolidateunspents",
            urlencoding::encode(wallet_id)
        );
        self.client.http.post(ctx, &path, params).await
    }

    /// Walk every page of a wallet's unspents, calling `on_page` once per page
    /// in cursor order (empty pages included).
    ///
    /// `query` holds the caller's filters and is updated in place with the
    /// `prevId` cursor of the next page. On failure it points at the first
    /// page not yet delivered, so calling `unspents` again with the same
    /// `query` resumes the walk without refetching earlier pages.
    pub async fn unspents<F>(
        &self,
        ctx: &CancellationToken,
        wallet_id: &str,
        query: &mut QueryParams,
        mut on_page: F,
    ) -> Result<(), SdkError>
    where
        F: FnMut(&UnspentList),
    {
        let path = unspents_path(wallet_id);
        loop {
            let page: UnspentList = self.client.http.get(ctx, &path, Some(&*query)).await?;
            on_page(&page);

            match page.next_cursor() {
                Some(cursor) => query.set(PREV_ID_PARAM, cursor),
                None => return Ok(()),
            }
        }
    }

    /// Pull-model variant of [`unspents`](Self::unspents).
    ///
    /// Yields pages in cursor order and ends after the last page or after the
    /// first error. Dropping the stream stops the walk; to resume, start a new
    /// stream with `prevId` set to the last page's
    /// [`next_cursor`](UnspentList::next_cursor).
    pub fn unspent_pages(
        &self,
        ctx: &CancellationToken,
        wallet_id: &str,
        mut query: QueryParams,
    ) -> impl Stream<Item = Result<UnspentList, SdkError>> + Send + 'static {
        let http = self.client.http.clone();
        let ctx = ctx.clone();
        let path = unspents_path(wallet_id);

        async_stream::stream! {
            loop {
                let page: UnspentList = match http.get(&ctx, &path, Some(&query)).await {
                    Ok(page) => page,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };
                let next = page.next_cursor().map(str::to_string);
                yield Ok(page);

                match next {
                    Some(cursor) => query.set(PREV_ID_PARAM, cursor),
                    None => break,
                }
            }
        }
    }
}

fn unspents_path(wallet_id: &str) -> String {
    format!("wallet/{}/unspents", urlencoding::encode(wallet_id))
}
