//! Bidirectional mapping between host-side and declared symbol naming conventions.
//!
//! The introspection database declares properties and signals with dash-separated
//! names (`"icon-name"`, `"row-activated"`), while the host language addresses
//! members with underscore-separated identifiers. A [`NameScheme`] is attached to
//! each lazy category and translates lookup keys into declared names before slot
//! matching, and declared names back into exposed cache keys during full
//! materialization.
//!
//! The signal scheme additionally carries a fixed `on_` prefix convention as an
//! example of a notification naming quirk: `on_row_activated` addresses the
//! declared signal `row-activated`. Keys without the prefix do not map to any
//! declared name and therefore fail the lookup outright.

/// Naming convention applied to lookups against one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameScheme {
    /// Keys match declared names verbatim (methods, fields, constants)
    Verbatim,
    /// Word-separator substitution, one direction only: underscores in the
    /// incoming key become dashes; declared names are exposed unchanged
    Property,
    /// `on_` prefix stripping plus separator substitution, with a reverse
    /// transform restoring the prefix on exposed names
    Signal,
}

impl NameScheme {
    /// Translate an incoming lookup key into the declared name to match slots
    /// against. Returns `None` when the key cannot address any declared name
    /// under this scheme, which fails the lookup without consuming slots.
    #[must_use]
    pub fn to_declared(&self, key: &str) -> Option<String> {
        match self {
            NameScheme::Verbatim => Some(key.to_string()),
            NameScheme::Property => Some(key.replace('_', "-")),
            NameScheme::Signal => key.strip_prefix("on_").map(|rest| rest.replace('_', "-")),
        }
    }

    /// Translate a declared name into the key it is exposed under when the
    /// category materializes without a lookup key driving it. Identity for
    /// schemes without a reverse transform.
    #[must_use]
    pub fn to_exposed(&self, declared: &str) -> String {
        match self {
            NameScheme::Verbatim | NameScheme::Property => declared.to_string(),
            NameScheme::Signal => format!("on_{}", declared.replace('-', "_")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_is_identity() {
        assert_eq!(
            NameScheme::Verbatim.to_declared("do_thing"),
            Some("do_thing".to_string())
        );
        assert_eq!(NameScheme::Verbatim.to_exposed("do_thing"), "do_thing");
    }

    #[test]
    fn test_property_substitutes_one_direction() {
        assert_eq!(
            NameScheme::Property.to_declared("icon_name"),
            Some("icon-name".to_string())
        );
        // Already-declared spellings pass through unchanged
        assert_eq!(
            NameScheme::Property.to_declared("icon-name"),
            Some("icon-name".to_string())
        );
        // No reverse transform: declared spelling is exposed as-is
        assert_eq!(NameScheme::Property.to_exposed("icon-name"), "icon-name");
    }

    #[test]
    fn test_signal_strips_prefix_and_restores_it() {
        assert_eq!(
            NameScheme::Signal.to_declared("on_row_activated"),
            Some("row-activated".to_string())
        );
        assert_eq!(
            NameScheme::Signal.to_exposed("row-activated"),
            "on_row_activated"
        );
    }

    #[test]
    fn test_signal_without_prefix_fails() {
        assert_eq!(NameScheme::Signal.to_declared("row_activated"), None);
        assert_eq!(NameScheme::Signal.to_declared(""), None);
    }
}
