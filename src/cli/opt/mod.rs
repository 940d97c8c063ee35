use std::{borrow::Cow, fmt, io, path::PathBuf, str::FromStr};

use clap::Parser;
use contract_model::kind::{CodeClassifier, ARCHITECTURE_CODES, COMMUNICATION_CODES};
use contract_pdf::RenderOptions;
use contract_preview::PreviewOptions;
use serde::Deserialize;
use thiserror::*;

mod de;
use de::{deserialize_opt_bool, deserialize_opt_path, deserialize_opt_string};

/// The format to export the document into
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Format {
    /// Portable Document Format
    #[default]
    Pdf,
    /// The on-screen preview, as a standalone page
    Html,
    /// Sections, items and totals printed to the console
    Summary,
}

#[derive(Debug)]
/// Failed to parse a format name
pub struct FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `pdf`, `html` or `summary`")?;
        Ok(())
    }
}

impl std::error::Error for FormatError {}

impl FromStr for Format {
    type Err = FormatError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "pdf" => Ok(Self::Pdf),
            "html" | "preview" => Ok(Self::Html),
            "summary" | "txt" => Ok(Self::Summary),
            _ => Err(FormatError {}),
        }
    }
}

impl Format {
    fn to_static_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_static_str())
    }
}

#[derive(Parser)]
/// Render contracts and quotes from RON job files
pub struct Options {
    /// The job files to render (e.g. demos/architecture.ron)
    #[clap(required = true)]
    pub files: Vec<PathBuf>,
    /// Where to store the output, `-` for the console
    #[clap(long, short = 'o')]
    pub out: Option<PathBuf>,
    /// Format of the output. Valid choices are:
    ///
    /// "pdf", "html" and "summary"
    #[clap(default_value_t, long, short = 'F')]
    pub format: Format,
    /// Render a contract as this kind, whatever the project type
    #[clap(long)]
    pub contract_type: Option<String>,
    /// Scale of the HTML preview, in percent
    #[clap(long, default_value = "100")]
    pub zoom: u16,
    /// Hide phase descriptions and deliverables in the HTML preview
    #[clap(long)]
    pub hide_descriptions: bool,

    /// Settings passed as command line args
    #[clap(flatten)]
    pub cl_settings: Settings,

    /// Settings as a file
    #[clap(long)]
    pub settings: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

impl Options {
    pub fn settings(&self) -> Result<Cow<Settings>, SettingsError> {
        if let Some(settings_path) = &self.settings {
            let text = std::fs::read_to_string(settings_path)?;
            let mut settings: Settings = ron::from_str(&text)?;
            settings.merge(&self.cl_settings);
            Ok(Cow::Owned(settings))
        } else {
            Ok(Cow::Borrowed(&self.cl_settings))
        }
    }
}

#[derive(Debug, Default, Clone, Parser, Deserialize)]
pub struct Settings {
    /// Project type codes of architecture contracts
    #[clap(long = "architecture-code")]
    #[serde(default)]
    pub architecture_codes: Vec<String>,
    /// Project type codes of communication contracts
    #[clap(long = "communication-code")]
    #[serde(default)]
    pub communication_codes: Vec<String>,
    /// Show phase descriptions and deliverables in the phase table
    #[clap(long)]
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub print_phase_descriptions: Option<bool>,
    /// The producer written into the PDF
    #[clap(long)]
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub producer: Option<String>,
    /// The folder relative image paths are resolved against
    #[clap(long)]
    #[serde(default, deserialize_with = "deserialize_opt_path")]
    pub images_dir: Option<PathBuf>,
}

impl Settings {
    fn merge(&mut self, cl: &Settings) {
        if !cl.architecture_codes.is_empty() {
            self.architecture_codes = cl.architecture_codes.clone();
        }
        if !cl.communication_codes.is_empty() {
            self.communication_codes = cl.communication_codes.clone();
        }
        if let Some(print) = cl.print_phase_descriptions {
            self.print_phase_descriptions = Some(print);
        }
        if let Some(producer) = &cl.producer {
            self.producer = Some(producer.clone());
        }
        if let Some(images_dir) = &cl.images_dir {
            self.images_dir = Some(images_dir.clone());
        }
    }

    /// The classifier for the configured codes, or the built-in ones
    pub fn classifier(&self) -> CodeClassifier {
        fn codes<'a>(configured: &'a [String], default: &'a [&'a str]) -> Vec<&'a str> {
            if configured.is_empty() {
                default.to_vec()
            } else {
                configured.iter().map(String::as_str).collect()
            }
        }
        CodeClassifier::new(
            codes(&self.architecture_codes, ARCHITECTURE_CODES),
            codes(&self.communication_codes, COMMUNICATION_CODES),
        )
    }

    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default();
        if let Some(print) = self.print_phase_descriptions {
            options.show_phase_descriptions = print;
        }
        if let Some(producer) = &self.producer {
            options.producer = producer.clone();
        }
        options
    }

    pub fn preview_options(&self, opt: &Options) -> PreviewOptions {
        PreviewOptions {
            show_descriptions: !opt.hide_descriptions,
            zoom: opt.zoom,
            contract_type: opt.contract_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use contract_model::kind::ContractTypeClassifier;

    use super::{Format, Settings};

    #[test]
    fn formats() {
        assert_eq!("pdf".parse::<Format>().unwrap(), Format::Pdf);
        assert_eq!("preview".parse::<Format>().unwrap(), Format::Html);
        assert!("png".parse::<Format>().is_err());
        assert_eq!(Format::Summary.to_string(), "summary");
    }

    #[test]
    fn settings_file() {
        let mut settings: Settings = ron::from_str(
            r#"(
                architecture_codes: ["promotion"],
                print_phase_descriptions: false,
                producer: "Atelier Nord",
            )"#,
        )
        .unwrap();
        let cl = Settings {
            producer: Some("contract-tool".to_owned()),
            ..Settings::default()
        };
        settings.merge(&cl);

        let classifier = settings.classifier();
        assert!(classifier.is_architecture("promotion_immobiliere"));
        assert!(!classifier.is_architecture("moe"));
        assert!(classifier.is_communication("branding"));

        let options = settings.render_options();
        assert!(!options.show_phase_descriptions);
        assert_eq!(options.producer, "contract-tool");
    }
}
