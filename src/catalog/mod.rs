mod breaking_changes;
mod schema;

pub use breaking_changes::{breaking_changes_for, BREAKING_CHANGES};
pub use schema::{
    BreakingChange, BreakingChangeKind, BreakingChangeSeverity, DisplayOptions, NodeTypeDef,
    PropertyDef, PropertyOption,
};

use std::sync::OnceLock;

const NODE_TYPES_JSON: &str = include_str!("data/node_types.json");

static NODE_TYPES: OnceLock<Vec<NodeTypeDef>> = OnceLock::new();

/// Read-only lookup over the embedded node type catalog. Parsing happens
/// once, lazily, on first access.
pub struct Catalog;

impl Catalog {
    fn all() -> &'static [NodeTypeDef] {
        NODE_TYPES
            .get_or_init(|| {
                serde_json::from_str(NODE_TYPES_JSON).expect("embedded node_types.json must parse")
            })
            .as_slice()
    }

    pub fn list() -> &'static [NodeTypeDef] {
        Self::all()
    }

    pub fn get(node_type: &str) -> Option<&'static NodeTypeDef> {
        Self::all().iter().find(|n| n.node_type == node_type)
    }

    /// Same lookup but tolerant of a bare local name (`"webhook"` instead
    /// of `"n8n-nodes-base.webhook"`).
    pub fn get_by_local_or_full(type_or_name: &str) -> Option<&'static NodeTypeDef> {
        Self::get(type_or_name).or_else(|| {
            Self::all()
                .iter()
                .find(|n| n.node_type.rsplit('.').next() == Some(type_or_name))
        })
    }

    pub fn categories() -> Vec<&'static str> {
        let mut cats: Vec<&str> = Self::all().iter().map(|n| n.category.as_str()).collect();
        cats.sort_unstable();
        cats.dedup();
        cats
    }

    pub fn by_category(category: &str) -> Vec<&'static NodeTypeDef> {
        Self::all().iter().filter(|n| n.category == category).collect()
    }

    /// Fuzzy search by display name or type, ranked by normalized edit
    /// distance (`strsim::normalized_levenshtein`).
    pub fn search(query: &str) -> Vec<&'static NodeTypeDef> {
        let query_lower = query.to_lowercase();
        let mut scored: Vec<(f64, &'static NodeTypeDef)> = Self::all()
            .iter()
            .map(|n| {
                let haystacks = [n.display_name.to_lowercase(), n.node_type.to_lowercase()];
                let best = haystacks
                    .iter()
                    .map(|h| {
                        if h.contains(&query_lower) {
                            1.0
                        } else {
                            strsim::normalized_levenshtein(h, &query_lower)
                        }
                    })
                    .fold(0.0_f64, f64::max);
                (best, n)
            })
            .filter(|(score, _)| *score > 0.3)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
        scored.into_iter().map(|(_, n)| n).collect()
    }

    /// Nearest known type name to an unrecognized one, used by the
    /// autofixer's "did you mean" rule.
    pub fn suggest(unknown_type: &str) -> Option<&'static str> {
        Self::all()
            .iter()
            .map(|n| (strsim::normalized_levenshtein(&n.node_type, unknown_type), n))
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap())
            .filter(|(score, _)| *score > 0.5)
            .map(|(_, n)| n.node_type.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads_and_finds_webhook() {
        let def = Catalog::get("n8n-nodes-base.webhook").expect("webhook must be in catalog");
        assert_eq!(def.category, "trigger");
        assert!(def.is_trigger);
    }

    #[test]
    fn test_local_name_lookup() {
        let def = Catalog::get_by_local_or_full("httpRequest").unwrap();
        assert_eq!(def.node_type, "n8n-nodes-base.httpRequest");
    }

    #[test]
    fn test_search_matches_substring() {
        let results = Catalog::search("sheets");
        assert!(results.iter().any(|n| n.node_type.contains("googleSheets")));
    }

    #[test]
    fn test_suggest_fixes_typo() {
        let suggestion = Catalog::suggest("n8n-nodes-base.webhok");
        assert_eq!(suggestion, Some("n8n-nodes-base.webhook"));
    }

    #[test]
    fn test_categories_are_sorted_and_deduped() {
        let cats = Catalog::categories();
        let mut sorted = cats.clone();
        sorted.sort_unstable();
        assert_eq!(cats, sorted);
        let mut deduped = cats.clone();
        deduped.dedup();
        assert_eq!(cats.len(), deduped.len());
    }
}
