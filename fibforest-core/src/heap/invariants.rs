//! Structural checks used by the heap test suites.

use super::FibonacciHeap;

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Walks every tree and verifies the structural heap invariants.
    ///
    /// # Errors
    /// Returns a description of the first violated invariant.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let occupied = self.slots.iter().filter(|slot| slot.node.is_some()).count();
        if occupied != self.len {
            return Err(format!("len is {} but {occupied} slots are occupied", self.len));
        }
        if self.free.len() + occupied != self.slots.len() {
            return Err("free list does not cover every vacant slot".to_owned());
        }

        let Some(min) = self.min else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(format!("no minimum recorded for {} elements", self.len))
            };
        };

        let mut reached = 0;
        for root in self.ring(min) {
            let node = self.node(root);
            if node.parent.is_some() {
                return Err(format!("root {root} has a parent"));
            }
            if node.marked {
                return Err(format!("root {root} is marked"));
            }
            if node.precedes(self.node(min)) {
                return Err(format!("root {root} precedes the recorded minimum {min}"));
            }
            reached += self.check_tree(root)?;
        }

        if reached != self.len {
            return Err(format!("{reached} nodes reachable but len is {}", self.len));
        }
        Ok(())
    }

    /// Checks the subtree rooted at `index` and returns its size.
    fn check_tree(&self, index: usize) -> Result<usize, String> {
        let node = self.node(index);
        if self.node(node.left).right != index || self.node(node.right).left != index {
            return Err(format!("sibling links around {index} are inconsistent"));
        }

        let mut size = 1;
        let mut degree = 0;
        if let Some(first) = node.child {
            for child in self.ring(first) {
                let child_node = self.node(child);
                if child_node.parent != Some(index) {
                    return Err(format!("child {child} does not point back at {index}"));
                }
                if child_node.precedes(node) {
                    return Err(format!("child {child} has a smaller key than parent {index}"));
                }
                degree += 1;
                size += self.check_tree(child)?;
            }
        }

        if degree != node.degree {
            return Err(format!(
                "node {index} records degree {} but has {degree} children",
                node.degree
            ));
        }
        if size < fibonacci(degree + 2) {
            return Err(format!(
                "node {index} of degree {degree} roots only {size} nodes"
            ));
        }
        Ok(size)
    }
}

fn fibonacci(n: usize) -> usize {
    let (mut current, mut next) = (0_usize, 1_usize);
    for _ in 0..n {
        (current, next) = (next, current.saturating_add(next));
    }
    current
}
