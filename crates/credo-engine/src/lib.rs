//! # credo-engine
//!
//! The Credo analysis pipeline.
//!
//! [`Analyzer::analyze`] extracts claims from a document, retrieves and
//! verifies evidence for every claim concurrently, and aggregates the results
//! into a [`credo_core::TrustReport`]:
//!
//! ```no_run
//! # async fn run() -> Result<(), credo_engine::AnalyzeError> {
//! let config = credo_config::CredoConfig::load()?;
//! let analyzer = credo_engine::Analyzer::from_config(&config)?;
//! let report = analyzer.analyze("WHO reported a 45% drop in misdiagnosis.").await?;
//! println!("{} ({})", report.trust_score, report.risk_level);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;

mod analyzer;
mod error;
mod sources;

pub use aggregate::{NO_CLAIMS_SUMMARY, aggregate, recommendations, trust_score};
pub use analyzer::Analyzer;
pub use error::AnalyzeError;
pub use sources::build_sources;
