//! Europeana Rust SDK
//!
//! Blocking client for the Europeana Entity API (`suggest`, `retrieve`,
//! `resolve`) and the Search API (`search`), plus chained lookup helpers that
//! turn responses into tables.
//!
//! # Example
//!
//! ```no_run
//! use europeana_sdk::{EntityApi, EntityClient};
//! use europeana_sdk::lookup::{enrich_agents, suggest_table, EnrichOptions};
//! use europeana_domain::EntityType;
//!
//! let client = EntityClient::with_api_key("api2demo").expect("Failed to build client");
//!
//! let (_total, mut table) = suggest_table(&client, "leonardo", EntityType::Agent, false)
//!     .expect("Failed to suggest");
//! enrich_agents(&mut table, &client, &EnrichOptions::default())
//!     .expect("Failed to enrich");
//!
//! let leonardo = client.retrieve(EntityType::Agent, "146741").expect("Failed to retrieve");
//! println!("{:?}", leonardo.pref_label());
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
pub mod lookup;
mod mock;

pub use client::{entity_from_location, EntityClient};
pub use config::{
    ClientConfig, API_KEY_ENV, DEFAULT_ENTITY_URL, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::SdkError;
pub use europeana_domain::EntityApi;
pub use mock::MockEntityApi;
