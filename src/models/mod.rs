//! Domain types returned by and sent to the Feedly API.
//!
//! Every field whose wire encoding is irregular picks its converter statically
//! through `#[serde(with = "...")]` pointing into [`crate::wire`], so the shape
//! of each field is visible in its declaration.

mod auth;
mod entry;
mod feed;
mod markers;
mod profile;
mod stream;

pub use auth::{AccessTokenResponse, AuthenticationResponse};
pub use entry::{Entry, EntryContent, Label, Link, Origin, Visual};
pub use feed::{Category, Feed, Interest, SearchFeed, Subscription, Tag, Topic};
pub use markers::{ReadOperations, StreamReadOperation, UnreadCount};
pub use profile::Profile;
pub use stream::{
    stream_id, ContentType, FeedSorting, MixesOptions, SearchOptions, SearchResponse,
    StreamEntriesResponse, StreamIdsResponse, StreamOptions, UnreadCountOptions,
};

pub(crate) use feed::SearchFeedsResponse;
pub(crate) use markers::{MarkerAction, MarkerRequest, UnreadCountsResponse};
pub(crate) use stream::MixesResponse;
