//! Kill Bill client.
//!
//! An async client for the Kill Bill billing server REST API. One
//! [`KillBillClient`] owns the HTTP transport and hands out an API per
//! resource: accounts, subscriptions, invoices, payments and so on.
//!
//! Every operation takes [`RequestOptions`]. Mutating operations need an
//! audit author (`created_by`); it is sent with the reason and comment as
//! `X-Killbill-*` headers.
//!
//! # Example
//!
//! ```no_run
//! use killbill_client::{ClientConfig, KillBillClient, RequestOptions};
//! use killbill_client::model::{Account, AuditLevel, Currency};
//!
//! # async fn example() -> Result<(), killbill_client::ClientError> {
//! let config = ClientConfig::new()
//!     .with_server_url("http://127.0.0.1:8080")
//!     .with_tenant("bob", "lazar");
//! let client = KillBillClient::new(&config)?;
//!
//! let opts = RequestOptions::audit("admin", "signup", "created from the website");
//! let account = Account {
//!     name: Some("John Doe".to_string()),
//!     external_key: Some("john-doe".to_string()),
//!     currency: Some(Currency::new("USD")?),
//!     ..Account::default()
//! };
//! let created = client.accounts().create_account(&account, &opts).await?;
//!
//! if let Some(id) = created.account_id {
//!     let found = client
//!         .accounts()
//!         .get_account(id, true, false, AuditLevel::None, &RequestOptions::new())
//!         .await?;
//!     println!("balance: {:?}", found.and_then(|a| a.account_balance));
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod api;
mod client;
mod config;
mod error;
mod http;
mod options;
mod query;

pub use killbill_model as model;

pub use api::*;
pub use client::KillBillClient;
pub use config::ClientConfig;
pub use error::{BillingException, ClientError};
pub use http::{
    ApiRequest, KillBillHttpClient, RawResponse, HEADER_API_KEY, HEADER_API_SECRET,
    HEADER_COMMENT, HEADER_CREATED_BY, HEADER_REASON, HEADER_REQUEST_ID,
};
pub use options::RequestOptions;
pub use query::{
    encode_segment, plugin_property, CallCompletion, Pagination, QueryParams,
    DEFAULT_CALL_TIMEOUT_SECONDS, DEFAULT_LIMIT,
};
