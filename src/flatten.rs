//! Collection tree flattening
//!
//! Walks the item tree and collects every node's raw URL. Children are always
//! emitted before their parent, so a folder's (usually empty) URL lands after
//! all of its descendants.

use crate::models::CollectionItem;

/// Flatten a list of collection items into their URLs, children before parent
pub fn flatten(nodes: &[CollectionItem]) -> Vec<String> {
    let mut urls = Vec::new();
    flatten_into(nodes, &mut urls);
    urls
}

fn flatten_into(nodes: &[CollectionItem], urls: &mut Vec<String>) {
    for node in nodes {
        if !node.is_leaf() {
            flatten_into(&node.children, urls);
        }
        urls.push(node.url().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemRequest, RequestUrl};

    fn node(url: &str, children: Vec<CollectionItem>) -> CollectionItem {
        CollectionItem {
            name: url.to_string(),
            children,
            request: ItemRequest {
                method: "GET".to_string(),
                url: RequestUrl {
                    raw: url.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn leaf(url: &str) -> CollectionItem {
        node(url, Vec::new())
    }

    #[test]
    fn test_children_emitted_before_parent() {
        let tree = vec![node("A", vec![leaf("B"), node("C", vec![leaf("D")])])];
        assert_eq!(flatten(&tree), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn test_leaves_keep_order() {
        let nodes = vec![leaf("X"), leaf("Y")];
        assert_eq!(flatten(&nodes), vec!["X", "Y"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_empty_and_absent_item_are_equivalent() {
        let with_empty: CollectionItem =
            serde_json::from_str(r#"{"name":"n","item":[],"request":{"url":{"raw":"/a"}}}"#).unwrap();
        let without: CollectionItem =
            serde_json::from_str(r#"{"name":"n","request":{"url":{"raw":"/a"}}}"#).unwrap();
        let with_null: CollectionItem =
            serde_json::from_str(r#"{"name":"n","item":null,"request":{"url":{"raw":"/a"}}}"#).unwrap();

        assert_eq!(flatten(&[with_empty.clone()]), vec!["/a"]);
        assert_eq!(flatten(&[with_empty]), flatten(&[without.clone()]));
        assert_eq!(flatten(&[with_null]), flatten(&[without]));
    }

    #[test]
    fn test_folder_without_request_emits_empty_url() {
        let folder: CollectionItem =
            serde_json::from_str(r#"{"name":"users","item":[{"name":"list","request":{"url":"/users"}}]}"#).unwrap();
        assert_eq!(flatten(&[folder]), vec!["/users", ""]);
    }

    #[test]
    fn test_deep_nesting() {
        let mut tree = leaf("depth-0");
        for depth in 1..=64 {
            tree = node(&format!("depth-{}", depth), vec![tree]);
        }
        let urls = flatten(&[tree]);
        assert_eq!(urls.len(), 65);
        assert_eq!(urls.first().map(String::as_str), Some("depth-0"));
        assert_eq!(urls.last().map(String::as_str), Some("depth-64"));
    }

    #[test]
    fn test_flatten_is_repeatable() {
        let tree = vec![node("A", vec![leaf("B"), node("C", vec![leaf("D")])]), leaf("E")];
        assert_eq!(flatten(&tree), flatten(&tree));
    }
}
