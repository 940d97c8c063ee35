#![warn(missing_docs)]
//! # contract-model
//!
//! This crate turns the generic records of a business application (a
//! document, its lines and the profile of the issuing agency) into models
//! that can be rendered: an architecture (MOE) contract, a communication
//! agency contract or a quote.
//!
//! ```
//! use contract_model::{
//!     builder::build_contract,
//!     input::{AgencyProfile, BusinessDocument, LineItem},
//!     kind::CodeClassifier,
//! };
//!
//! let document = BusinessDocument {
//!     project_type: Some("moe".to_owned()),
//!     ..BusinessDocument::default()
//! };
//! let lines = vec![LineItem {
//!     amount: Some(1000.0),
//!     ..LineItem::default()
//! }];
//! let classifier = CodeClassifier::default();
//! let agency = AgencyProfile::default();
//! let model = build_contract(&document, &lines, &agency, &classifier, None).unwrap();
//! assert_eq!(model.core().totals.total_ttc, 1200.0);
//! ```

pub mod builder;
mod de;
pub mod format;
pub mod input;
pub mod job;
pub mod kind;
pub mod model;
pub mod plan;
pub mod quote;

pub use job::{Job, JobKind, LoadError};
