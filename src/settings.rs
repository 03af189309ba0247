//! The SumatraPDF `-print-settings` token.
//!
//! SumatraPDF takes every page- and paper-related setting as one
//! comma-separated argument. Tokens are emitted in a fixed order: pages,
//! subset, orientation, scale, color mode, duplex mode, bin, paper size and
//! copy count. Free-form values (pages, bin, paper size) are emitted
//! exactly as given; only blank ones are left out.

use std::fmt;

use crate::config::{PrintOptions, non_blank};

/// Ordered list of print-setting tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintSettings {
    tokens: Vec<String>,
}

impl PrintSettings {
    /// Collect the tokens for `options`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfprint::config::PrintOptions;
    /// use pdfprint::settings::PrintSettings;
    ///
    /// let options = PrintOptions::new().with_monochrome(true).with_copies(2);
    /// assert_eq!(PrintSettings::from_options(&options).to_string(), "monochrome,2x");
    /// ```
    pub fn from_options(options: &PrintOptions) -> Self {
        let mut tokens = Vec::new();

        if let Some(pages) = non_blank(options.pages.as_deref()) {
            tokens.push(pages.to_string());
        }

        if let Some(subset) = options.subset {
            tokens.push(subset.to_string());
        }

        if let Some(orientation) = options.orientation {
            tokens.push(orientation.to_string());
        }

        if let Some(scale) = options.scale {
            tokens.push(scale.to_string());
        }

        match options.monochrome {
            Some(true) => tokens.push("monochrome".to_string()),
            Some(false) => tokens.push("color".to_string()),
            None => {}
        }

        if let Some(side) = options.side {
            tokens.push(side.to_string());
        }

        if let Some(bin) = non_blank(options.bin.as_deref()) {
            tokens.push(format!("bin={bin}"));
        }

        if let Some(paper) = non_blank(options.paper_size.as_deref()) {
            tokens.push(format!("paper={paper}"));
        }

        if let Some(copies) = options.copies.filter(|&n| n > 0) {
            tokens.push(format!("{copies}x"));
        }

        Self { tokens }
    }

    /// The individual tokens, in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when no setting applies and the argument should be left out.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for PrintSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(","))
    }
}
