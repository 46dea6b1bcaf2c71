//! View controllers — drive the list and detail state against the client.
//!
//! Each controller owns a [`CoinboardClient`](crate::client::CoinboardClient)
//! and its state behind an `Arc<async_lock::RwLock<_>>`. Operations take a
//! ticket under the lock, release it for the network call, and re-lock to
//! commit. Results for superseded tickets are discarded by the state.

pub mod coin_detail;
pub mod market_list;

pub use coin_detail::CoinDetailView;
pub use market_list::{fetch_tab, MarketList};
