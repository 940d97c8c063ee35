#![warn(missing_docs)]
//! # pdf-base
//!
//! Library to create a PDF file with a rustic API
//!
//! ```
//! use pdf_base::{
//!     common::MediaBox,
//!     content::Contents,
//!     font::StandardFont,
//!     high::{Handle, Page, Resources},
//! };
//!
//! // Create a new handle
//! let mut doc = Handle::new();
//!
//! // Set some metadata
//! doc.meta.title = Some("Devis D-2024-001".to_owned());
//! doc.meta.producer = "pdf-base".to_owned();
//!
//! // Draw a page
//! let mut contents = Contents::new(MediaBox::A4.height);
//! contents
//!     .text(StandardFont::Helvetica, 12.0, 56.0, 72.0, "Bon pour accord")
//!     .expect("write to a buffer");
//!
//! // Add the page to the document
//! doc.pages.push(Page {
//!     media_box: MediaBox::A4,
//!     resources: Resources::default(),
//!     contents: contents.finish(),
//! });
//!
//! // Write the PDF to a buffer
//! let bytes = doc.to_bytes().expect("write to a buffer");
//! assert!(bytes.starts_with(b"%PDF-"));
//! ```
//!
//! Reference: <https://www.adobe.com/content/dam/acom/en/devnet/pdf/PDF32000_2008.pdf>

pub mod common;
pub mod content;
pub mod encoding;
pub mod font;
pub mod high;
pub mod low;
mod lowering;
pub mod util;
pub mod write;

#[doc(hidden)]
pub extern crate chrono;
