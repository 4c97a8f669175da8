//! # costview_client
//!
//! Cost backend client and dashboard shell for costview.
//!
//! - **Api**: the `CostApi` seam and its HTTP implementation
//! - **Config**: where the backend lives
//! - **Shell**: the `Dashboard` load-state machine that ties the client to
//!   the views in `costview_core`
//!
//! # Example
//!
//! ```rust,ignore
//! use costview_client::{ClientConfig, Dashboard, HttpCostClient};
//!
//! let client = HttpCostClient::new(&ClientConfig::from_env())?;
//! let mut dashboard = Dashboard::new(client);
//! dashboard.refresh().await;
//! if let Some(view) = dashboard.view() {
//!     println!("Top provider: {}", view.cards.top_provider);
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod shell;

pub use api::{CostApi, HttpCostClient};
pub use config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL};
pub use error::{ClientError, ClientResult};
pub use shell::{Dashboard, LoadState, LoadTicket, LOAD_ERROR_MESSAGE};
