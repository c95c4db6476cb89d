//! YouTube Data API v3 integration module.
//!
//! Provides a typed client for searching and looking up videos, channels and
//! comments, reporting every outcome as an [`Envelope`].

pub mod client;
pub mod envelope;
pub mod models;
pub mod order;
pub mod transport;

pub use client::{ApiAccess, YouTubeService};
pub use envelope::{Envelope, Failure};
pub use order::{CommentOrder, SearchOrder};
pub use transport::Transport;
