// ABOUTME: Presentation statistics for the slidemark application
// ABOUTME: Reports document size, slide count and the estimated CO2 saved against a slide-deck file

/// Reference size of a typical office slide deck, in KB.
pub const REFERENCE_DECK_KB: f64 = 1500.0;

/// Estimated grams of CO2 per KB transferred.
pub const CO2_GRAMS_PER_KB: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationStats {
    pub size_kb: f64,
    pub slide_count: usize,
    pub co2_saved_grams: u64,
}

impl PresentationStats {
    pub fn compute(html: &str, slide_count: usize) -> Self {
        let size_kb = html.len() as f64 / 1024.0;
        let saved = ((REFERENCE_DECK_KB - size_kb) * CO2_GRAMS_PER_KB).round();
        Self {
            size_kb,
            slide_count,
            co2_saved_grams: saved.max(0.0) as u64,
        }
    }

    pub fn formatted_size(&self) -> String {
        format!("{:.1} KB", self.size_kb)
    }

    /// How much lighter the document is than the reference deck, in percent.
    pub fn percent_lighter(&self) -> i64 {
        ((1.0 - self.size_kb / REFERENCE_DECK_KB) * 100.0).round() as i64
    }

    pub fn report(&self) -> String {
        format!(
            "Presentation statistics:\n\
             - Total size: {}\n\
             - Slides: {}\n\
             - CO2 saved: {}g\n\
             \n\
             This HTML presentation is {}% lighter than a typical slide-deck file.",
            self.formatted_size(),
            self.slide_count,
            self.co2_saved_grams,
            self.percent_lighter()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_document() {
        let html = "x".repeat(2048);
        let stats = PresentationStats::compute(&html, 4);

        assert_eq!(stats.formatted_size(), "2.0 KB");
        assert_eq!(stats.slide_count, 4);
        // (1500 - 2) * 0.6 = 898.8
        assert_eq!(stats.co2_saved_grams, 899);
        assert_eq!(stats.percent_lighter(), 100);
    }

    #[test]
    fn test_savings_never_go_negative() {
        let html = "x".repeat(2000 * 1024);
        let stats = PresentationStats::compute(&html, 1);
        assert_eq!(stats.co2_saved_grams, 0);
        assert!(stats.percent_lighter() < 0);
    }

    #[test]
    fn test_report_mentions_every_figure() {
        let stats = PresentationStats::compute("<html></html>", 7);
        let report = stats.report();
        assert!(report.contains("Slides: 7"));
        assert!(report.contains("KB"));
        assert!(report.contains("CO2 saved"));
    }
}
