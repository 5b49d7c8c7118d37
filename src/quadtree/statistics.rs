use serde::Serialize;

use super::Node;
use super::QuadTree;

/// Summary of the shape of a tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TreeStatistics {
    pub num_nodes: usize,
    pub num_leaves: usize,
    /// Child slots of branches that hold no node because their
    /// quadrant is empty.
    pub num_empty_quadrants: usize,
    pub max_depth: usize,
    /// Particles stored across all leaves. A particle on a boundary
    /// line between quadrants is counted once per leaf containing it.
    pub num_particles: usize,
}

impl TreeStatistics {
    pub fn of<L>(tree: Option<&QuadTree<L>>) -> Self {
        let mut statistics = Self::default();
        if let Some(tree) = tree {
            statistics.add(tree);
        }
        statistics
    }

    fn add<L>(&mut self, tree: &QuadTree<L>) {
        self.num_nodes += 1;
        self.max_depth = self.max_depth.max(tree.depth);
        match tree.node {
            Node::Tree(ref children) => {
                for child in children.iter() {
                    match child {
                        Some(child) => self.add(child),
                        None => self.num_empty_quadrants += 1,
                    }
                }
            }
            Node::Leaf(ref leaf) => {
                self.num_leaves += 1;
                self.num_particles += leaf.len();
            }
        }
    }
}

impl<L> QuadTree<L> {
    pub fn statistics(&self) -> TreeStatistics {
        TreeStatistics::of(Some(self))
    }
}

#[cfg(test)]
mod tests {
    use super::TreeStatistics;
    use crate::prelude::MVec;
    use crate::quadtree::QuadTree;
    use crate::quadtree::QuadTreeConfig;
    use crate::region::Region;

    #[test]
    fn statistics_of_absent_tree() {
        assert_eq!(
            TreeStatistics::of::<MVec>(None),
            TreeStatistics::default()
        );
    }

    #[test]
    fn statistics_of_small_tree() {
        let positions = [
            MVec::new(1.0, 1.0),
            MVec::new(1.0, 1.0),
            MVec::new(99.0, 99.0),
        ];
        let tree = QuadTree::new(
            &QuadTreeConfig::default(),
            positions,
            &Region::from_size(100.0, 100.0),
        )
        .unwrap();
        assert_eq!(
            tree.statistics(),
            TreeStatistics {
                num_nodes: 3,
                num_leaves: 2,
                num_empty_quadrants: 2,
                max_depth: 1,
                num_particles: 3,
            }
        );
    }
}
