use serde::Serialize;

use crate::registry::Registry;

/// A navigation link to one service section of the reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub href: String,
}

/// Builds one anchor link per service, in registry order.
///
/// `base_url` is the URL of the reference page itself, e.g. `/api-reference`.
pub fn navigation(registry: &Registry, base_url: &str) -> Vec<NavEntry> {
    registry
        .services()
        .iter()
        .map(|service| NavEntry {
            label: service.name.clone(),
            href: format!("{}#{}", base_url, service.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::sample_registry;
    use expect_test::expect;

    #[test]
    fn test_navigation_for_sample_registry() {
        let entries = navigation(&sample_registry(), "/api-reference");
        let rendered: Vec<String> = entries
            .iter()
            .map(|entry| format!("{} -> {}", entry.label, entry.href))
            .collect();

        expect![[r#"
            [
                "Parent Company -> /api-reference#parent-company",
                "Area -> /api-reference#area",
                "SubArea -> /api-reference#subarea",
                "ER Buffer -> /api-reference#er-buffer",
                "Census -> /api-reference#census",
                "Ancillary -> /api-reference#ancillary",
            ]
        "#]]
        .assert_debug_eq(&rendered);
    }

    #[test]
    fn test_navigation_empty_registry() {
        let registry = Registry::new(vec![]).unwrap();
        assert!(navigation(&registry, "/api-reference").is_empty());
    }
}
