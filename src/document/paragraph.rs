//! Paragraph and run elements.

use crate::document::image::Image;
use crate::document::properties::{Properties, Value};

/// Inline content of a paragraph: text runs and inline images.
#[derive(Debug, Clone)]
pub enum Inline {
    Run(Run),
    Image(Image),
}

/// A text run: a span of text sharing one set of character properties.
///
/// # Examples
///
/// ```
/// use longan::Run;
///
/// let run = Run::new("important").prop("bold", true).prop("size", 14);
/// assert_eq!(run.text(), "important");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Run {
    text: String,
    properties: Properties,
}

impl Run {
    /// Create a run with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: Properties::new(),
        }
    }

    /// Set a character property (chainable).
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.set(name, value);
        self
    }

    /// The run's text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The run's character properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

impl From<&str> for Run {
    fn from(text: &str) -> Self {
        Run::new(text)
    }
}

impl From<String> for Run {
    fn from(text: String) -> Self {
        Run::new(text)
    }
}

/// A paragraph: a block of inline content with paragraph-level properties.
///
/// # Examples
///
/// ```
/// use longan::{Paragraph, Run};
///
/// let para = Paragraph::new()
///     .prop("align", "center")
///     .text("Hello, ")
///     .run(Run::new("world").prop("bold", true));
/// assert_eq!(para.inlines().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    properties: Properties,
    inlines: Vec<Inline>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph containing a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    /// Create a paragraph with the given properties.
    pub fn with_properties(properties: Properties) -> Self {
        Self {
            properties,
            inlines: Vec::new(),
        }
    }

    /// Set a paragraph property (chainable).
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.set(name, value);
        self
    }

    /// Append a plain text run.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.inlines.push(Inline::Run(Run::new(text)));
        self
    }

    /// Append a run.
    pub fn run(mut self, run: impl Into<Run>) -> Self {
        self.inlines.push(Inline::Run(run.into()));
        self
    }

    /// Append an inline image.
    pub fn image(mut self, image: Image) -> Self {
        self.inlines.push(Inline::Image(image));
        self
    }

    /// The paragraph's properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The paragraph's inline content, in order.
    pub fn inlines(&self) -> &[Inline] {
        &self.inlines
    }
}
