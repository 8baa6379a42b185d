use crate::types::errors::RouterError;
use crate::types::settings::ClientSettings;
use crate::types::view::NavEntry;

/// Trait defining the section router interface.
pub trait TabRouterTrait {
    fn navigate_to(&mut self, section_id: &str) -> Result<(), RouterError>;
    /// Applies a URL fragment (with or without the leading `#`) and returns the
    /// section that ends up visible.
    fn handle_fragment(&mut self, fragment: &str) -> &str;
    fn active_section(&self) -> &str;
    fn default_section(&self) -> &str;
    fn is_known(&self, section_id: &str) -> bool;
    fn is_visible(&self, section_id: &str) -> bool;
    fn sections(&self) -> &[String];
    fn fragment(&self) -> String;
    fn nav_entries(&self) -> Vec<NavEntry>;
}

/// Keeps track of which section of the page is shown.
///
/// Exactly one known section is active at any time; the address fragment is
/// derived from it.
#[derive(Debug, Clone)]
pub struct TabRouter {
    sections: Vec<String>,
    default_section: String,
    active: String,
}

impl TabRouter {
    pub fn new(sections: Vec<String>, default_section: &str) -> Result<Self, RouterError> {
        if sections.is_empty() {
            return Err(RouterError::NoSections);
        }
        if !sections.iter().any(|s| s == default_section) {
            return Err(RouterError::UnknownSection(default_section.to_string()));
        }
        Ok(Self {
            sections,
            default_section: default_section.to_string(),
            active: default_section.to_string(),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, RouterError> {
        Self::new(settings.sections.clone(), &settings.default_section)
    }
}

impl TabRouterTrait for TabRouter {
    /// Unknown ids are rejected and leave the current section in place.
    fn navigate_to(&mut self, section_id: &str) -> Result<(), RouterError> {
        if !self.is_known(section_id) {
            return Err(RouterError::UnknownSection(section_id.to_string()));
        }
        self.active = section_id.to_string();
        Ok(())
    }

    fn handle_fragment(&mut self, fragment: &str) -> &str {
        let target = fragment.trim().trim_start_matches('#');
        if self.is_known(target) {
            self.active = target.to_string();
        } else {
            log::debug!("unknown fragment '{}', showing '{}'", target, self.default_section);
            self.active = self.default_section.clone();
        }
        &self.active
    }

    fn active_section(&self) -> &str {
        &self.active
    }

    fn default_section(&self) -> &str {
        &self.default_section
    }

    fn is_known(&self, section_id: &str) -> bool {
        self.sections.iter().any(|s| s == section_id)
    }

    fn is_visible(&self, section_id: &str) -> bool {
        self.active == section_id
    }

    fn sections(&self) -> &[String] {
        &self.sections
    }

    fn fragment(&self) -> String {
        format!("#{}", self.active)
    }

    fn nav_entries(&self) -> Vec<NavEntry> {
        self.sections
            .iter()
            .map(|id| NavEntry {
                id: id.clone(),
                active: *id == self.active,
            })
            .collect()
    }
}
