use super::state::Section;

/// Placeholder copy shown in the content area for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionContent {
    pub heading: &'static str,
    pub body: &'static str,
}

pub const fn content_for(section: Section) -> SectionContent {
    match section {
        Section::Home => SectionContent {
            heading: "Welcome to the server room",
            body: "Racks are humming and the link lights are up. Pick a section to look around.",
        },
        Section::Projects => SectionContent {
            heading: "Projects",
            body: "Project write-ups are being racked and cabled. Check back soon.",
        },
        Section::Tools => SectionContent {
            heading: "Tools",
            body: "The crash cart is stocked. Tool notes will be wheeled in shortly.",
        },
        Section::Contact => SectionContent {
            heading: "Contact",
            body: "Leave a note on the cart. Contact details are on their way.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_distinct_content() {
        let headings: std::collections::HashSet<_> =
            Section::ALL.iter().map(|s| content_for(*s).heading).collect();
        assert_eq!(headings.len(), Section::ALL.len());
    }
}
