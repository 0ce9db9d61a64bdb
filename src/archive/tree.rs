//! Rebuilds the directory hierarchy implied by a flat list of archive paths.
//!
//! Zip archives only record the entries someone chose to store, so
//! `docs/guide/intro.md` may appear without `docs/` or `docs/guide/`. The
//! builder synthesizes the missing directories and returns every node sorted
//! by depth, then by path.

use std::collections::HashMap;

/// One file or directory inside an archive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveEntryNode {
    /// Final path segment, never empty
    pub name: String,
    /// Normalized path: '/' separated, no leading or trailing '/'
    pub path: String,
    pub is_directory: bool,
    /// Number of '/' in `path`; root-level entries are depth 0
    pub depth: usize,
}

impl ArchiveEntryNode {
    fn new(path: String, is_directory: bool) -> Self {
        let name = match path.rsplit_once('/') {
            Some((_, name)) => name.to_string(),
            None => path.clone(),
        };
        let depth = path.matches('/').count();
        Self { name, path, is_directory, depth }
    }

    /// Path of the containing directory, `None` at the archive root
    pub fn parent_path(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }
}

/// Split on '/' and drop empty segments, so leading, trailing and doubled
/// separators all collapse.
fn normalize(raw: &str) -> String {
    raw.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the full, sorted node list for a sequence of raw entry names.
///
/// Empty or separator-only names are skipped. A path listed more than once
/// collapses to a single node; once a node is a directory it stays one.
pub fn build_entry_tree<I, S>(raw_entries: I) -> Vec<ArchiveEntryNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut nodes: HashMap<String, ArchiveEntryNode> = HashMap::new();

    for raw in raw_entries {
        let raw = raw.as_ref();
        let path = normalize(raw);
        if path.is_empty() {
            continue;
        }
        let is_directory = raw.ends_with('/');

        let mut node = ArchiveEntryNode::new(path.clone(), is_directory);
        if let Some(existing) = nodes.get(&path) {
            node.is_directory |= existing.is_directory;
        }
        nodes.insert(path.clone(), node);

        // Every key already in the map has all of its ancestors present
        let mut current = path.as_str();
        while let Some((parent, _)) = current.rsplit_once('/') {
            if nodes.contains_key(parent) {
                break;
            }
            nodes.insert(parent.to_string(), ArchiveEntryNode::new(parent.to_string(), true));
            current = parent;
        }
    }

    let mut sorted: Vec<ArchiveEntryNode> = nodes.into_values().collect();
    sorted.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.path.cmp(&b.path)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str, is_directory: bool) -> ArchiveEntryNode {
        ArchiveEntryNode::new(path.to_string(), is_directory)
    }

    #[test]
    fn test_synthesizes_missing_ancestors() {
        let nodes = build_entry_tree(["a/b/c.txt", "a/d/"]);
        assert_eq!(
            nodes,
            vec![
                node("a", true),
                node("a/b", true),
                node("a/d", true),
                node("a/b/c.txt", false),
            ]
        );
        assert_eq!(nodes[0].depth, 0);
        assert_eq!(nodes[1].depth, 1);
        assert_eq!(nodes[3].depth, 2);
        assert_eq!(nodes[3].name, "c.txt");
    }

    #[test]
    fn test_empty_input() {
        let nodes = build_entry_tree(Vec::<String>::new());
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_skips_empty_and_root_entries() {
        let nodes = build_entry_tree(["", "/", "//", "readme.md"]);
        assert_eq!(nodes, vec![node("readme.md", false)]);
    }

    #[test]
    fn test_normalizes_separators() {
        let nodes = build_entry_tree(["/docs//guide/", "docs/guide/intro.md"]);
        let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["docs", "docs/guide", "docs/guide/intro.md"]);
        assert!(nodes[1].is_directory);
        assert!(nodes.iter().all(|n| !n.name.is_empty()));
    }

    #[test]
    fn test_duplicates_collapse() {
        let nodes = build_entry_tree(["x/1.txt", "x/", "x/2.txt", "x/1.txt", "x/"]);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.iter().filter(|n| n.path == "x").count(), 1);
    }

    #[test]
    fn test_explicit_directory_after_synthesis() {
        let nodes = build_entry_tree(["lib/core.rs", "lib/"]);
        let lib = nodes.iter().find(|n| n.path == "lib").unwrap();
        assert!(lib.is_directory);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_file_entry_listed_after_children_stays_directory() {
        // "assets" is both a listed file and a parent; directory wins
        let nodes = build_entry_tree(["assets/logo.png", "assets"]);
        let assets = nodes.iter().find(|n| n.path == "assets").unwrap();
        assert!(assets.is_directory);
    }

    #[test]
    fn test_file_entry_listed_before_children_is_left_alone() {
        let nodes = build_entry_tree(["assets", "assets/logo.png"]);
        assert_eq!(nodes.len(), 2);
        let assets = nodes.iter().find(|n| n.path == "assets").unwrap();
        assert!(!assets.is_directory);
    }

    #[test]
    fn test_sorted_by_depth_then_path() {
        let nodes = build_entry_tree([
            "z/deep/file",
            "b.txt",
            "a/2",
            "a/1",
            "A.txt",
        ]);
        for pair in nodes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.depth < b.depth || (a.depth == b.depth && a.path <= b.path));
        }
        let roots: Vec<&str> = nodes.iter().filter(|n| n.depth == 0).map(|n| n.path.as_str()).collect();
        assert_eq!(roots, vec!["A.txt", "a", "b.txt", "z"]);
    }

    #[test]
    fn test_every_nested_node_has_directory_parent() {
        let nodes = build_entry_tree([
            "project/src/main.rs",
            "project/src/bin/tool.rs",
            "project/README",
            "other/",
            "project/tests/",
        ]);
        for n in nodes.iter().filter(|n| n.depth > 0) {
            let parent = n.parent_path().unwrap();
            let parents: Vec<_> = nodes.iter().filter(|p| p.path == parent).collect();
            assert_eq!(parents.len(), 1, "parent of {}", n.path);
            assert!(parents[0].is_directory);
            assert_eq!(parents[0].depth + 1, n.depth);
        }
    }

    #[test]
    fn test_idempotent() {
        let raw = ["m/n/o.txt", "m/", "p", "m/n/q/", "r/s"];
        assert_eq!(build_entry_tree(raw), build_entry_tree(raw));
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(node("a/b/c", false).parent_path(), Some("a/b"));
        assert_eq!(node("top", true).parent_path(), None);
    }
}
