/// Decides whether an ImmeDB annotation names an ICE-family element.
///
/// Hits whose annotation passes this predicate are preferred over all other
/// containing hits.
pub trait FamilyPredicate {
    fn is_ice_family(&self, annotation: &str) -> bool;
}

impl<F> FamilyPredicate for F
where
    F: Fn(&str) -> bool,
{
    fn is_ice_family(&self, annotation: &str) -> bool {
        self(annotation)
    }
}

/// How [`IceMatcher`] patterns are compared to an annotation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MatchMode {
    /// Annotation starts with a pattern (`ICESa2603` for `ICE`)
    #[default]
    Prefix,
    /// Annotation contains a pattern anywhere
    Contains,
}

/// Default pattern identifying ICE names in ImmeDB
pub const DEFAULT_ICE_PATTERN: &str = "ICE";

/// Pattern-based [`FamilyPredicate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceMatcher {
    pub patterns: Vec<String>,
    pub mode: MatchMode,
    pub ignore_case: bool,
}

impl Default for IceMatcher {
    fn default() -> Self {
        Self {
            patterns: vec![DEFAULT_ICE_PATTERN.to_string()],
            mode: MatchMode::Prefix,
            ignore_case: false,
        }
    }
}

impl IceMatcher {
    pub fn new(patterns: Vec<String>, mode: MatchMode, ignore_case: bool) -> Self {
        let patterns = if ignore_case {
            patterns.iter().map(|p| p.to_lowercase()).collect()
        } else {
            patterns
        };
        Self {
            patterns,
            mode,
            ignore_case,
        }
    }
}

impl FamilyPredicate for IceMatcher {
    fn is_ice_family(&self, annotation: &str) -> bool {
        let annotation = if self.ignore_case {
            annotation.to_lowercase()
        } else {
            annotation.to_string()
        };

        self.patterns.iter().any(|pattern| match self.mode {
            MatchMode::Prefix => annotation.starts_with(pattern.as_str()),
            MatchMode::Contains => annotation.contains(pattern.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix_matching() {
        let matcher = IceMatcher::default();
        assert!(matcher.is_ice_family("ICESa2603"));
        assert!(matcher.is_ice_family("ICEBs1"));
        assert!(!matcher.is_ice_family("IMEs459"));
        assert!(!matcher.is_ice_family("CIME302"));
        assert!(!matcher.is_ice_family("Tn916-ICE"));
        assert!(!matcher.is_ice_family("iceA"));
    }

    #[test]
    fn test_contains_ignore_case() {
        let matcher = IceMatcher::new(vec!["ice".to_string()], MatchMode::Contains, true);
        assert!(matcher.is_ice_family("Tn916-ICE"));
        assert!(matcher.is_ice_family("iceA"));
        assert!(!matcher.is_ice_family("IMEs459"));

        let upper = IceMatcher::new(vec!["ICE".to_string()], MatchMode::Prefix, true);
        assert!(upper.is_ice_family("iceSt3"));
    }

    #[test]
    fn test_multiple_patterns() {
        let matcher = IceMatcher::new(
            vec!["ICE".to_string(), "Tn916".to_string()],
            MatchMode::Prefix,
            false,
        );
        assert!(matcher.is_ice_family("Tn916"));
        assert!(matcher.is_ice_family("ICESt3"));
        assert!(!matcher.is_ice_family("IMESag1"));
    }

    #[test]
    fn test_closure_predicate() {
        let predicate = |name: &str| name.ends_with("_ICE");
        assert!(predicate.is_ice_family("element_ICE"));
        assert!(!predicate.is_ice_family("ICE_element"));
    }
}
