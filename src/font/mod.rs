//! # Font Management
//!
//! The document is set in the standard PDF Helvetica family, which needs
//! no embedding. Text is measured with the AFM widths in [`metrics`].

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// The standard PDF fonts the document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica => &metrics::HELVETICA,
            Self::HelveticaBold => &metrics::HELVETICA_BOLD,
        }
    }

    /// Width of `text` in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        self.metrics().measure_string(text, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_names() {
        assert_eq!(StandardFont::Helvetica.pdf_name(), "Helvetica");
        assert_eq!(StandardFont::HelveticaBold.pdf_name(), "Helvetica-Bold");
    }

    #[test]
    fn test_bold_measures_wider() {
        let regular = StandardFont::Helvetica.measure_string("Hotel", 10.0);
        let bold = StandardFont::HelveticaBold.measure_string("Hotel", 10.0);
        assert!(bold > regular);
    }
}
