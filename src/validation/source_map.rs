use super::issue::SourceLocation;
use std::collections::HashMap;

/// Maps node names to their approximate line/column in the raw workflow
/// JSON text, so CLI output (and editors) can point at the exact spot a
/// validation issue came from instead of just naming the node.
///
/// This is a textual scan, not a JSON-aware parse: it looks for each
/// node's `"name": "..."` occurrence. Good enough for hand-authored or
/// exported workflow files, which is the only place source locations are
/// useful (API responses have no associated source text).
pub struct SourceMap {
    locations: HashMap<String, SourceLocation>,
}

impl SourceMap {
    pub fn build(raw: &str, node_names: &[&str]) -> Self {
        let mut locations = HashMap::new();
        for &name in node_names {
            let needle = format!("\"name\": \"{name}\"");
            let pos = raw.find(&needle).or_else(|| raw.find(&format!("\"name\":\"{name}\"")));
            if let Some(byte_offset) = pos {
                let (line, column) = line_column_at(raw, byte_offset);
                let snippet = raw
                    .lines()
                    .nth(line.saturating_sub(1))
                    .unwrap_or("")
                    .trim()
                    .to_string();
                locations.insert(name.to_string(), SourceLocation { line, column, snippet });
            }
        }
        Self { locations }
    }

    pub fn get(&self, node_name: &str) -> Option<&SourceLocation> {
        self.locations.get(node_name)
    }
}

fn line_column_at(text: &str, byte_offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut last_newline = 0;
    for (i, ch) in text.char_indices() {
        if i >= byte_offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            last_newline = i + 1;
        }
    }
    let column = byte_offset.saturating_sub(last_newline) + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_node_name_line_and_column() {
        let raw = "{\n  \"nodes\": [\n    { \"name\": \"Start\" }\n  ]\n}";
        let map = SourceMap::build(raw, &["Start"]);
        let loc = map.get("Start").unwrap();
        assert_eq!(loc.line, 3);
    }

    #[test]
    fn test_missing_node_returns_none() {
        let map = SourceMap::build("{}", &["Ghost"]);
        assert!(map.get("Ghost").is_none());
    }
}
