//! Page structure: which sections the landing page renders, in order.

/// Top-level sections of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Navbar,
    Hero,
    ProductViewer,
    Showcase,
    Performance,
    Features,
    Highlights,
    Footer,
}

/// Render order inside `<main>`.
pub const SECTION_ORDER: [Section; 8] = [
    Section::Navbar,
    Section::Hero,
    Section::ProductViewer,
    Section::Showcase,
    Section::Performance,
    Section::Features,
    Section::Highlights,
    Section::Footer,
];

impl Section {
    /// Element id of the section's root, for sections that have one.
    pub fn dom_id(&self) -> Option<&'static str> {
        match self {
            Section::Navbar | Section::Footer => None,
            Section::Hero => Some("hero"),
            Section::ProductViewer => Some("product-viewer"),
            Section::Showcase => Some("showcase"),
            Section::Performance => Some("performance"),
            Section::Features => Some("features"),
            Section::Highlights => Some("highlights"),
        }
    }

    /// Root tag of the section.
    pub fn tag(&self) -> &'static str {
        match self {
            Section::Navbar => "header",
            Section::Footer => "footer",
            _ => "section",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_order_is_fixed() {
        assert_eq!(SECTION_ORDER.first(), Some(&Section::Navbar));
        assert_eq!(SECTION_ORDER.last(), Some(&Section::Footer));
        let showcase = SECTION_ORDER.iter().position(|s| *s == Section::Showcase);
        let performance = SECTION_ORDER.iter().position(|s| *s == Section::Performance);
        assert!(showcase < performance);
    }

    #[test]
    fn test_sections_are_unique() {
        let unique: HashSet<_> = SECTION_ORDER.iter().collect();
        assert_eq!(unique.len(), SECTION_ORDER.len());
        let ids: HashSet<_> = SECTION_ORDER.iter().filter_map(Section::dom_id).collect();
        assert_eq!(ids.len(), 6);
    }
}
