// Page router - URL path to page resolution
use crate::domain::page::PageId;

/// Resolves paths against the pages this deployment serves. `home` is
/// always enabled and catches every path that matches nothing else.
#[derive(Debug, Clone)]
pub struct PageRouter {
    enabled: Vec<PageId>,
}

impl PageRouter {
    pub fn new(enabled: &[PageId]) -> Self {
        let enabled = PageId::ALL
            .into_iter()
            .filter(|p| *p == PageId::Home || enabled.contains(p))
            .collect();
        Self { enabled }
    }

    pub fn enabled(&self) -> &[PageId] {
        &self.enabled
    }

    pub fn resolve(&self, path: &str) -> PageId {
        self.enabled
            .iter()
            .copied()
            .find(|p| p.path() == path)
            .unwrap_or(PageId::Home)
    }
}

impl Default for PageRouter {
    fn default() -> Self {
        Self::new(&PageId::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_paths() {
        let router = PageRouter::default();
        assert_eq!(router.resolve("/"), PageId::Home);
        assert_eq!(router.resolve("/gapminder"), PageId::Gapminder);
        assert_eq!(router.resolve("/iris"), PageId::Iris);
        assert_eq!(router.resolve("/tips"), PageId::Tips);
    }

    #[test]
    fn test_unknown_paths_fall_back_to_home() {
        let router = PageRouter::default();
        assert_eq!(router.resolve("/unknown"), PageId::Home);
        assert_eq!(router.resolve(""), PageId::Home);
        assert_eq!(router.resolve("iris"), PageId::Home);
        assert_eq!(router.resolve("/iris/"), PageId::Home);
    }

    #[test]
    fn test_disabled_page_resolves_home() {
        let router = PageRouter::new(&[PageId::Gapminder, PageId::Iris]);
        assert_eq!(router.resolve("/tips"), PageId::Home);
        assert_eq!(router.resolve("/iris"), PageId::Iris);
        assert_eq!(router.enabled(), &[PageId::Home, PageId::Gapminder, PageId::Iris]);
    }
}
