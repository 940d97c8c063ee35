//! The node tree of a preview

use contract_model::plan::{Field, SectionKind};

/// The look of a run of text
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextStyle {
    /// Running text
    Body,
    /// Emphasized text
    Strong,
    /// Secondary text
    Muted,
}

impl TextStyle {
    pub(crate) fn class(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Strong => "strong",
            Self::Muted => "muted",
        }
    }
}

/// A table cell: a main text and optional lines below it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// The main text
    pub text: String,
    /// Secondary lines
    pub details: Vec<String>,
}

impl Cell {
    /// A cell with a single text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            details: Vec::new(),
        }
    }

    /// An empty cell
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A row of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// One cell per column
    Cells(Vec<Cell>),
    /// A heading across all columns
    Group(String),
}

/// One of the two party cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// e.g. `MAÎTRE D'OUVRAGE`
    pub heading: &'static str,
    /// The name of the party
    pub name: String,
    /// The populated fields
    pub rows: Vec<(Field, String)>,
}

/// Which image to show
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageRole {
    /// The logo of the issuer
    Logo,
    /// The signature of the issuer
    Signature,
}

/// A node of the preview
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A planned section and its content
    Section {
        /// The section
        kind: SectionKind,
        /// The title, if the section shows one
        title: Option<&'static str>,
        /// The content
        children: Vec<Node>,
    },
    /// The colored label of the document kind
    Badge(&'static str),
    /// A heading
    Heading(String),
    /// A paragraph
    Text {
        /// The field this text shows, if it is optional
        field: Option<Field>,
        /// The text
        text: String,
        /// The look
        style: TextStyle,
        /// Show at most that many lines
        clamp: Option<usize>,
    },
    /// A labelled optional value
    LabelValue {
        /// The field
        field: Field,
        /// The formatted value
        value: String,
    },
    /// Party cards, side by side
    Cards(Vec<Card>),
    /// A table
    Table {
        /// Column headers
        headers: Vec<&'static str>,
        /// Rows
        rows: Vec<Row>,
    },
    /// Label/amount pairs, the last one emphasized
    Totals(Vec<(String, String)>),
    /// An image by URL
    Image {
        /// Which image
        role: ImageRole,
        /// Where to load it from
        url: String,
    },
    /// An empty box for a handwritten signature
    SignatureBox {
        /// Who signs
        signatory: &'static str,
        /// The name of the party
        name: String,
    },
    /// A party that signed in advance, with its scanned signature if any
    Signed {
        /// Who signs
        signatory: &'static str,
        /// The name of the party
        name: String,
        /// The scanned signature
        image: Option<String>,
    },
    /// A notice in place of missing content
    Notice(&'static str),
}

impl Node {
    /// Collect the optional fields below this node, in order
    pub(crate) fn collect_fields(&self, section: SectionKind, out: &mut Vec<(SectionKind, Field)>) {
        match self {
            Node::Section { kind, children, .. } => {
                for child in children {
                    child.collect_fields(*kind, out);
                }
            }
            Node::Text {
                field: Some(field), ..
            }
            | Node::LabelValue { field, .. } => out.push((section, *field)),
            Node::Cards(cards) => {
                for card in cards {
                    out.extend(card.rows.iter().map(|(field, _)| (section, *field)));
                }
            }
            _ => {}
        }
    }
}
