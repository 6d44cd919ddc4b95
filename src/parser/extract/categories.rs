use super::LINK_CLOSE;
use crate::parser::strip_anchor_or_label;

const CATEGORY_OPEN: &str = "[[Category:";

/// Category names in the order they appear. Duplicates are kept.
pub fn extract(body: &str) -> Vec<String> {
    body.split(CATEGORY_OPEN)
        .skip(1)
        .filter_map(|segment| {
            let end = segment.find(LINK_CLOSE)?;
            Some(strip_anchor_or_label(&segment[..end]).to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_order_with_duplicates() {
        let body = "intro [[Category:Living people]] x [[Category:French poets|Hugo]] [[Category:Living people]]";
        assert_eq!(
            extract(body),
            vec!["Living people", "French poets", "Living people"]
        );
    }

    #[test]
    fn anchor_dropped() {
        assert_eq!(extract("[[Category:Poets#H]]"), vec!["Poets"]);
    }

    #[test]
    fn unterminated_segment_skipped() {
        assert_eq!(extract("[[Category:Open [[Category:Closed]]"), vec!["Closed"]);
        assert_eq!(extract("[[Category:Never closed"), Vec::<String>::new());
    }

    #[test]
    fn none() {
        assert!(extract("<text>[[Paris]]</text>").is_empty());
    }
}
