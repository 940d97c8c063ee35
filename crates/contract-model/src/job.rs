//! A render job: everything that is needed to produce one document

use std::{fs, io, path::Path};

use displaydoc::Display;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    de::deserialize_opt_string,
    input::{AgencyProfile, BusinessDocument, LineItem},
};

/// Error when loading a job or settings file
#[derive(Debug, Display, Error)]
pub enum LoadError {
    /// Failed to read the file
    Io(#[from] io::Error),
    /// Failed to decode the file: {0}
    Ron(#[from] ron::error::Error),
}

/// Which document to produce from a job
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// A detailed contract
    #[default]
    Contract,
    /// A quote
    Quote,
}

/// The inputs of a document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Job {
    /// Whether to render a contract or a quote
    pub kind: JobKind,
    /// The document record
    pub document: BusinessDocument,
    /// The lines of the document, in order
    pub lines: Vec<LineItem>,
    /// The issuing agency
    pub agency: AgencyProfile,
    /// Explicit contract type code, overrides the project type
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub contract_type: Option<String>,
}

impl Job {
    /// Parse a job from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, LoadError> {
        Ok(ron::from_str(text)?)
    }

    /// Read a job from a RON file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}
