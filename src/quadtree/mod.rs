pub mod config;
mod statistics;
pub mod visualization;

pub use config::QuadTreeConfig;
pub use statistics::TreeStatistics;

use log::trace;

use crate::prelude::MVec;
use crate::region::Region;
use crate::region::NUM_QUADRANTS;

/// Upper bound on the depth of any tree, regardless of the configured
/// `max_depth`.
pub const MAX_DEPTH: usize = 32;

pub trait LeafDataType: Clone {
    fn pos(&self) -> &MVec;
}

impl<L: LeafDataType> LeafDataType for &L {
    fn pos(&self) -> &MVec {
        (*self).pos()
    }
}

/// The children of a branch, in quadrant order. A child is `None` if
/// its quadrant contains no particles.
pub type Tree<L> = Box<[Option<QuadTree<L>>; NUM_QUADRANTS]>;
pub type Leaf<L> = Vec<L>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node<L> {
    Tree(Tree<L>),
    Leaf(Leaf<L>),
}

/// A node of the tree together with the region it was built for.
/// Empty regions are never represented by a node.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadTree<L> {
    pub node: Node<L>,
    pub extent: Region,
    pub depth: usize,
}

impl<L: LeafDataType> QuadTree<L> {
    /// Builds a tree over all particles contained in `extent`.
    /// Particles outside of it are dropped. Returns `None` if no
    /// particle is left.
    pub fn new(
        config: &QuadTreeConfig,
        particles: impl IntoIterator<Item = L>,
        extent: &Region,
    ) -> Option<Self> {
        let particles = particles
            .into_iter()
            .filter(|particle| extent.contains(particle.pos()))
            .collect();
        Self::build(config, particles, *extent, 0)
    }

    /// Builds the subtree at `depth` for `extent`. The particles are
    /// expected to be filtered by the caller already: a leaf takes
    /// them as they are.
    pub fn build(
        config: &QuadTreeConfig,
        particles: Vec<L>,
        extent: Region,
        depth: usize,
    ) -> Option<Self> {
        if particles.is_empty() {
            return None;
        }
        if depth >= config.max_depth.min(MAX_DEPTH)
            || particles.len() <= config.max_num_particles_per_leaf
        {
            return Some(Self {
                node: Node::Leaf(particles),
                extent,
                depth,
            });
        }
        let children = extent.get_quadrants().map(|quadrant| {
            let particles_in_quadrant = particles
                .iter()
                .filter(|particle| quadrant.contains(particle.pos()))
                .cloned()
                .collect();
            Self::build(config, particles_in_quadrant, quadrant, depth + 1)
        });
        Some(Self {
            node: Node::Tree(Box::new(children)),
            extent,
            depth,
        })
    }
}

impl<L> QuadTree<L> {
    /// Visits every node in pre-order: the node itself first, then its
    /// children in quadrant order. Branches are passed `None`, leaves
    /// their particles.
    pub fn depth_first_map<'a>(&'a self, closure: &mut impl FnMut(&'a Region, Option<&'a [L]>)) {
        trace!("Visiting node at depth {}: {:?}", self.depth, self.extent);
        match self.node {
            Node::Tree(ref children) => {
                closure(&self.extent, None);
                for child in children.iter().flatten() {
                    child.depth_first_map(closure);
                }
            }
            Node::Leaf(ref leaf) => {
                closure(&self.extent, Some(leaf.as_slice()));
            }
        }
    }

    pub fn depth_first_map_leaf<'a>(&'a self, closure: &mut impl FnMut(&'a Region, &'a [L])) {
        self.depth_first_map(&mut |extent, leaf| {
            if let Some(leaf) = leaf {
                closure(extent, leaf);
            }
        });
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    pub fn children(&self) -> Option<&[Option<Self>; NUM_QUADRANTS]> {
        match self.node {
            Node::Tree(ref children) => Some(&**children),
            Node::Leaf(_) => None,
        }
    }
}

/// Walks a tree that may be absent. An absent tree is not visited at all.
pub fn traverse<'a, L>(
    tree: Option<&'a QuadTree<L>>,
    mut visit: impl FnMut(&'a Region, Option<&'a [L]>),
) {
    if let Some(tree) = tree {
        tree.depth_first_map(&mut visit);
    }
}
