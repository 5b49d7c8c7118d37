use super::traverse;
use super::QuadTree;
use crate::color::RColor;
use crate::prelude::MVec;
use crate::visualization::DrawItem;
use crate::visualization::DrawRect;
use crate::visualization::DrawText;

/// Offset of the particle count label from the upper left corner of a
/// leaf.
const LABEL_OFFSET: MVec = MVec::new(5.0, 10.0);

/// Outlines every node of the tree and labels each leaf with the
/// number of particles it holds.
pub fn draw_quadtree<L>(tree: Option<&QuadTree<L>>, color: RColor) -> Vec<DrawItem> {
    let mut items = vec![];
    traverse(tree, |extent, leaf| {
        items.push(DrawItem::Rect(DrawRect {
            min: extent.min(),
            max: extent.max(),
            color,
        }));
        if let Some(leaf) = leaf {
            items.push(DrawItem::Text(DrawText {
                position: extent.min() + LABEL_OFFSET,
                text: leaf.len().to_string(),
                color,
            }));
        }
    });
    items
}
