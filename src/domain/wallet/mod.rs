//! Wallet domain: unspent outputs and their consolidation.
//!
//! The unspents listing is cursor paginated: each page carries
//! `nextBatchPrevId`, which is sent back as `prevId` to fetch the following
//! page. An empty cursor marks the last page.

pub mod client;
pub mod wire;

pub use wire::{
    ConsolidateParams, ListMeta, TxInfo, Unspent, UnspentList, UnspentsFilter, PREV_ID_PARAM,
};
