//! REST API client for the Fintoc payments and banking platform
//!
//! This crate provides a complete client for the Fintoc API: links to bank
//! credentials, accounts and movements, payment intents, charges, refunds,
//! and the v2 treasury surface.
//!
//! # Features
//!
//! - **Managers**: One handle per endpoint family, each declaring exactly
//!   the operations its endpoints support
//! - **Lazy pagination**: Collections stream element by element, fetching
//!   pages only as they are consumed
//! - **Hydrated resources**: JSON payloads become typed resources with
//!   nested resources and parsed timestamps
//! - **Request signing**: JWS signatures on mutating requests, idempotency
//!   keys on every POST
//!
//! # Authentication
//!
//! Every request carries the secret API key in the `Authorization` header.
//! Mutating endpoints can additionally be signed with an RS256 JWS key via
//! [`JwsSigner`].
//!
//! # Example
//!
//! ```no_run
//! use fintoc_rest::Fintoc;
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fintoc_rest::FintocError> {
//!     let fintoc = Fintoc::new("sk_test_...");
//!
//!     // Stream movements of the first account under a link
//!     let link = fintoc.links.get("link_token_...", &[]).await?;
//!     let account = link.accounts().list(&[]).try_next().await?.unwrap();
//!     let movements = account.movements()?.list_all(&[]).await?;
//!     println!("{} movements", movements.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod manager;
pub mod managers;
pub mod paginator;
pub mod resolver;
pub mod resource;
pub mod resources;
pub mod transport;

// Re-export main types
pub use client::{Fintoc, FintocConfig, V2};
pub use error::{ApiError, ApiErrorKind, ErrorClass, FintocError, RestResult};
pub use manager::{Manager, ManagerKind, Operation};
pub use resolver::ResourceKind;
pub use resource::{Field, Resource};
pub use resources::{Account, Link};
pub use transport::{HttpClient, HttpRequest, HttpResponse, Method, Transport};

// Signing and webhook verification live in fintoc-auth
pub use fintoc_auth::{JwsSigner, SignatureError, WebhookError, WebhookSignature};
