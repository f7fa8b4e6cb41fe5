use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// JSON key used for points that carry no tag.
///
/// A point whose tag is literally `"null"` is written under the same key, so in
/// serialized output the two buckets can only be told apart by position.
/// [`TagCount::tag`] keeps them distinct in memory.
pub const MISSING_TAG_KEY: &str = "null";

/// Number of points sharing one tag value; `tag == None` is the untagged bucket.
///
/// Serializes as a single-entry object `{"<tag>": count}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: Option<String>,
    pub count: usize,
}

impl TagCount {
    /// Key under which this bucket is written
    pub fn key(&self) -> &str {
        self.tag.as_deref().unwrap_or(MISSING_TAG_KEY)
    }
}

impl Serialize for TagCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key(), &self.count)?;
        map.end()
    }
}

/// Count tag occurrences in a single pass, keeping first-seen order
pub fn count_tags<'a, I>(tags: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: Vec<TagCount> = Vec::new();

    for tag in tags {
        match counts.iter_mut().find(|c| c.tag.as_deref() == tag) {
            Some(entry) => entry.count += 1,
            None => counts.push(TagCount { tag: tag.map(str::to_string), count: 1 }),
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let counts = count_tags([Some("road"), None, Some("poi"), Some("road"), None]);
        assert_eq!(
            counts,
            vec![
                TagCount { tag: Some("road".into()), count: 2 },
                TagCount { tag: None, count: 2 },
                TagCount { tag: Some("poi".into()), count: 1 },
            ]
        );
    }

    #[test]
    fn test_tag_matching_is_case_sensitive() {
        let counts = count_tags([Some("poi"), Some("POI")]);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_singleton_map_shape() {
        let counts = count_tags([Some("poi"), None]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"[{"poi":1},{"null":1}]"#);
    }

    #[test]
    fn test_literal_null_tag_shares_the_missing_key() {
        let counts = count_tags([Some("null"), None, Some("null")]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].key(), counts[1].key());

        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"[{"null":2},{"null":1}]"#);
    }
}
