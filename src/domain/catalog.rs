//! Ordered course catalog: an arena-backed binary search tree keyed by course identifier.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::entities::Course;
use crate::domain::error::{DomainError, DomainResult};

/// What `insert` does when the identifier is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep both records; the newer one lands in the right subtree
    #[default]
    Retain,
    /// Refuse the insert, catalog unchanged
    Reject,
    /// Replace the stored course of the shallowest matching node
    Overwrite,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DuplicatePolicy::Retain => "retain",
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::Overwrite => "overwrite",
        };
        f.write_str(name)
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(DuplicatePolicy::Retain),
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(format!(
                "unknown duplicate policy '{other}' (expected retain, reject or overwrite)"
            )),
        }
    }
}

/// Result of a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new node was attached
    Added,
    /// An existing node's course was replaced (`Overwrite` policy only)
    Replaced,
}

/// Tree node stored in the arena.
#[derive(Debug)]
pub struct CatalogNode {
    pub course: Course,
    /// Subtree with strictly smaller identifiers
    pub left: Option<Index>,
    /// Subtree with equal or greater identifiers
    pub right: Option<Index>,
}

impl CatalogNode {
    fn leaf(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree of courses ordered by identifier.
///
/// Nodes live in a generational arena owned by the catalog and refer to their
/// children by `Index`. Nodes are never removed, so every stored index stays
/// valid for the catalog's lifetime. No rebalancing: sorted input degrades the
/// tree to a list, so walks use a loop or an explicit stack, never recursion.
#[derive(Debug, Default)]
pub struct CourseCatalog {
    arena: Arena<CatalogNode>,
    root: Option<Index>,
    policy: DuplicatePolicy,
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Insert a course.
    ///
    /// Strictly smaller identifiers descend left, equal or greater descend right.
    /// Only fails under `DuplicatePolicy::Reject`.
    #[instrument(level = "trace", skip(self, course), fields(id = course.identifier()))]
    pub fn insert(&mut self, course: Course) -> DomainResult<Insertion> {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(CatalogNode::leaf(course)));
            return Ok(Insertion::Added);
        };

        loop {
            let node = &self.arena[current];
            let ordering = course.identifier().cmp(node.course.identifier());
            let next = if ordering == Ordering::Less {
                node.left
            } else {
                node.right
            };

            if ordering == Ordering::Equal {
                match self.policy {
                    DuplicatePolicy::Retain => {}
                    DuplicatePolicy::Reject => {
                        return Err(DomainError::DuplicateIdentifier(
                            course.identifier().to_string(),
                        ));
                    }
                    DuplicatePolicy::Overwrite => {
                        debug!("replacing course {}", course.identifier());
                        self.arena[current].course = course;
                        return Ok(Insertion::Replaced);
                    }
                }
            }

            match next {
                Some(child) => current = child,
                None => {
                    let new_idx = self.arena.insert(CatalogNode::leaf(course));
                    let parent = &mut self.arena[current];
                    if ordering == Ordering::Less {
                        parent.left = Some(new_idx);
                    } else {
                        parent.right = Some(new_idx);
                    }
                    return Ok(Insertion::Added);
                }
            }
        }
    }

    /// Exact-key lookup. The shallowest match wins, which for retained
    /// duplicates is the earliest inserted record.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, identifier: &str) -> Option<&Course> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            match identifier.cmp(node.course.identifier()) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.search(identifier).is_some()
    }

    /// All courses in ascending identifier order, as an owned snapshot.
    #[instrument(level = "debug", skip(self))]
    pub fn sorted_courses(&self) -> Vec<Course> {
        self.iter().cloned().collect()
    }

    /// Borrowing in-order iterator.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of stored records, duplicates included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Nodes on the longest root-to-leaf path; 0 for an empty catalog.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.arena[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&CatalogNode> {
        self.arena.get(idx)
    }
}

impl Extend<Course> for CourseCatalog {
    /// Inserts every course; rejected duplicates are dropped with a debug log.
    fn extend<T: IntoIterator<Item = Course>>(&mut self, iter: T) {
        for course in iter {
            if let Err(e) = self.insert(course) {
                debug!("extend: {}", e);
            }
        }
    }
}

impl<'a> IntoIterator for &'a CourseCatalog {
    type Item = &'a Course;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order traversal driven by an explicit stack of pending ancestors.
pub struct InOrderIter<'a> {
    catalog: &'a CourseCatalog,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIter<'a> {
    fn new(catalog: &'a CourseCatalog) -> Self {
        Self {
            catalog,
            stack: Vec::new(),
            current: catalog.root,
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.catalog.arena[idx].left;
        }

        let idx = self.stack.pop()?;
        let node: &'a CatalogNode = &self.catalog.arena[idx];
        self.current = node.right;
        Some(&node.course)
    }
}
