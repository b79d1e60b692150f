//! # openalex-works
//!
//! A Rust client for single works in the [OpenAlex](https://openalex.org) catalog.
//!
//! Provides:
//! - **Fetch**: one GET per work, validated into a typed [`Work`]
//! - **Render**: plain citation, Markdown (with a citations-per-year chart), RIS, BibTeX
//! - **Traverse**: referenced works (lazy stream), citing works, related works
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> openalex_works::error::Result<()> {
//! use futures_util::TryStreamExt;
//! use openalex_works::OpenAlexClient;
//!
//! // Joins the polite pool when OPENALEX_MAILTO is set
//! let client = OpenAlexClient::from_env();
//!
//! let record = client.work("W2741809807").await?;
//! println!("{}", record.citation()?);
//! println!("{}", record.bibtex()?);
//!
//! let references: Vec<_> = record.references(&client).try_collect().await?;
//! for entry in &references {
//!     print!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```

pub mod authors;
pub mod chart;
pub mod citations;
pub mod client;
pub mod error;
pub mod export;
pub mod parse;
pub mod rate_limit;
pub mod references;
pub mod related;
pub mod types;
pub mod works;

// Re-export key types at the crate root.
pub use chart::{BarChart, ChartRenderer};
pub use client::OpenAlexClient;
pub use error::WorksError;
pub use types::*;
pub use works::WorkRecord;
