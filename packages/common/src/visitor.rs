use sitecraft_blocks::{Block, BlockTree, Column};

/// Visitor pattern for traversing block trees immutably
///
/// `location` is the list of indices that leads to the node:
/// `[root, column, index, column, index, ...]`. Blocks have an odd-length
/// location, columns an even-length one.
///
/// Override specific visit_* methods to act on nodes; call the matching
/// walk_* function to keep descending.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &BlockTree) {
        walk_tree(self, tree);
    }

    fn visit_block(&mut self, block: &Block, location: &[usize]) {
        walk_block(self, block, location);
    }

    fn visit_column(&mut self, column: &Column, location: &[usize]) {
        walk_column(self, column, location);
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &BlockTree) {
    for (index, block) in tree.blocks().iter().enumerate() {
        visitor.visit_block(block, &[index]);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block, location: &[usize]) {
    if let Some(layout) = block.layout() {
        let mut child_location = location.to_vec();
        for (column_index, column) in layout.columns.iter().enumerate() {
            child_location.push(column_index);
            visitor.visit_column(column, &child_location);
            child_location.pop();
        }
    }
}

pub fn walk_column<V: Visitor>(visitor: &mut V, column: &Column, location: &[usize]) {
    let mut child_location = location.to_vec();
    for (index, block) in column.iter().enumerate() {
        child_location.push(index);
        visitor.visit_block(block, &child_location);
        child_location.pop();
    }
}

/// Collects every block with its location, depth-first in document order
#[derive(Debug, Default)]
pub struct BlockCollector<'a> {
    pub blocks: Vec<(Vec<usize>, &'a Block)>,
}

impl<'a> BlockCollector<'a> {
    pub fn collect(tree: &'a BlockTree) -> Vec<(Vec<usize>, &'a Block)> {
        let mut collector = BlockCollector::default();
        for (index, block) in tree.blocks().iter().enumerate() {
            collector.push(block, vec![index]);
        }
        collector.blocks
    }

    fn push(&mut self, block: &'a Block, location: Vec<usize>) {
        self.blocks.push((location.clone(), block));
        if let Some(layout) = block.layout() {
            for (column_index, column) in layout.columns.iter().enumerate() {
                for (index, child) in column.iter().enumerate() {
                    let mut child_location = location.clone();
                    child_location.push(column_index);
                    child_location.push(index);
                    self.push(child, child_location);
                }
            }
        }
    }
}
