//! Render the catalog's tree shape with termtree.

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::catalog::CourseCatalog;

pub trait CatalogTreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl CatalogTreeConvert for CourseCatalog {
    /// Builds the display tree bottom-up (post-order, explicit stack).
    /// Child labels are prefixed `L:` / `R:`.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty catalog".to_string());
        };

        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        let mut stack = vec![(root_idx, "", false)];

        while let Some((idx, side, visited)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };

            if !visited {
                stack.push((idx, side, true));
                if let Some(right) = node.right {
                    stack.push((right, "R: ", false));
                }
                if let Some(left) = node.left {
                    stack.push((left, "L: ", false));
                }
                continue;
            }

            let mut tree = Tree::new(format!("{side}{}", node.course.identifier()));
            for child in [node.left, node.right].into_iter().flatten() {
                if let Some(child_tree) = built.remove(&child) {
                    tree.push(child_tree);
                }
            }
            built.insert(idx, tree);
        }

        built
            .remove(&root_idx)
            .unwrap_or_else(|| Tree::new("Empty catalog".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Course;

    #[test]
    fn given_empty_catalog_when_rendering_then_shows_placeholder() {
        let catalog = CourseCatalog::new();
        assert_eq!(catalog.to_tree_string().to_string().trim(), "Empty catalog");
    }

    #[test]
    fn given_three_courses_when_rendering_then_labels_children() {
        let mut catalog = CourseCatalog::new();
        for id in ["CS101", "CS050", "CS201"] {
            catalog.insert(Course::new(id, "x", vec![]).unwrap()).unwrap();
        }

        let rendered = catalog.to_tree_string().to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "CS101");
        assert!(lines[1].ends_with("L: CS050"), "got {:?}", lines);
        assert!(lines[2].ends_with("R: CS201"), "got {:?}", lines);
    }
}
