use super::schema::BreakingChange;
use std::sync::OnceLock;

const BREAKING_CHANGES_JSON: &str = include_str!("data/breaking_changes.json");

pub static BREAKING_CHANGES: OnceLock<Vec<BreakingChange>> = OnceLock::new();

fn all() -> &'static [BreakingChange] {
    BREAKING_CHANGES
        .get_or_init(|| {
            serde_json::from_str(BREAKING_CHANGES_JSON)
                .expect("embedded breaking_changes.json must parse")
        })
        .as_slice()
}

/// Every recorded breaking change for `node_type` whose version window
/// `[from_version, to_version)` straddles an upgrade from `current_version`
/// to `target_version`.
pub fn breaking_changes_for(
    node_type: &str,
    current_version: f64,
    target_version: f64,
) -> Vec<&'static BreakingChange> {
    all()
        .iter()
        .filter(|c| {
            c.node_type == node_type
                && c.from_version >= current_version
                && c.to_version <= target_version
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_if_v1_to_v2_is_a_breaking_shape_change() {
        let changes = breaking_changes_for("n8n-nodes-base.if", 1.0, 2.2);
        assert!(changes.iter().any(|c| c.property_path == "conditions"));
    }

    #[test]
    fn test_no_changes_reported_within_same_version() {
        let changes = breaking_changes_for("n8n-nodes-base.if", 2.2, 2.2);
        assert!(changes.is_empty());
    }
}
