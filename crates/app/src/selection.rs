//! Selection model over the backend-supplied directory tree.
//!
//! A flat set of paths with presence-only semantics: toggling a node
//! cascades to every descendant, but parent and child entries are
//! otherwise independent (no indeterminate checkbox state).

use shared::api::DirectoryNode;
use std::collections::HashSet;

/// The node's own path plus every path transitively reachable through
/// `children`.
pub fn descendant_paths(node: &DirectoryNode) -> Vec<String> {
    let mut paths = Vec::new();
    collect(node, &mut paths);
    paths
}

fn collect(node: &DirectoryNode, out: &mut Vec<String>) {
    out.push(node.path.clone());
    for child in &node.children {
        collect(child, out);
    }
}

/// Applies a checkbox toggle: inserts the full descendant set when
/// checked, removes exactly that set when unchecked.
pub fn toggle_selection(selected: &mut HashSet<String>, node: &DirectoryNode, checked: bool) {
    for path in descendant_paths(node) {
        if checked {
            selected.insert(path);
        } else {
            selected.remove(&path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DirectoryNode {
        serde_json::from_str(
            r#"{
                "name": "project",
                "path": "/p",
                "type": "folder",
                "children": [
                    {"name": "main.py", "path": "/p/main.py", "type": "file"},
                    {
                        "name": "lib",
                        "path": "/p/lib",
                        "type": "folder",
                        "children": [
                            {"name": "util.py", "path": "/p/lib/util.py", "type": "file"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn descendants_cover_whole_subtree() {
        let root = tree();
        assert_eq!(
            descendant_paths(&root),
            vec!["/p", "/p/main.py", "/p/lib", "/p/lib/util.py"]
        );
        assert_eq!(
            descendant_paths(&root.children[1]),
            vec!["/p/lib", "/p/lib/util.py"]
        );
    }

    #[test]
    fn folder_toggle_adds_exactly_the_subtree() {
        let root = tree();
        let mut selected = HashSet::new();
        toggle_selection(&mut selected, &root, true);
        let expected: HashSet<String> = descendant_paths(&root).into_iter().collect();
        assert_eq!(selected, expected);
    }

    #[test]
    fn folder_toggle_off_removes_the_same_subtree() {
        let root = tree();
        let mut selected = HashSet::new();
        selected.insert("/elsewhere/file.py".to_string());
        toggle_selection(&mut selected, &root.children[1], true);
        toggle_selection(&mut selected, &root.children[1], false);
        // Only the unrelated entry survives.
        assert_eq!(selected.len(), 1);
        assert!(selected.contains("/elsewhere/file.py"));
    }

    #[test]
    fn child_selection_leaves_parent_alone() {
        let root = tree();
        let mut selected = HashSet::new();
        let util = &root.children[1].children[0];
        toggle_selection(&mut selected, util, true);
        assert!(selected.contains("/p/lib/util.py"));
        assert!(!selected.contains("/p/lib"));
        assert!(!selected.contains("/p"));
    }

    #[test]
    fn parent_untoggle_does_not_require_child_state() {
        let root = tree();
        let mut selected = HashSet::new();
        let lib = &root.children[1];
        // Select only the child, then untoggle the unselected folder:
        // the cascade still removes the child.
        toggle_selection(&mut selected, &lib.children[0], true);
        toggle_selection(&mut selected, lib, false);
        assert!(selected.is_empty());
    }

    #[test]
    fn file_toggle_is_a_single_path() {
        let root = tree();
        let mut selected = HashSet::new();
        toggle_selection(&mut selected, &root.children[0], true);
        assert_eq!(selected.len(), 1);
        assert!(selected.contains("/p/main.py"));
    }
}
