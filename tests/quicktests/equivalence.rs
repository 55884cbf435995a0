use std::collections::BTreeSet;

use twin_bst::array::ArrayTree;
use twin_bst::linked::LinkedTree;
use twin_bst::{Order, SearchTree};

use crate::Op;

/// Keeps degenerate insert orders from allocating absurdly deep arrays.
const MAX_OPS: usize = 24;

/// Applies a set of operations to both trees.
fn do_ops(ops: &[Op<i8>], linked: &mut LinkedTree<i8>, array: &mut ArrayTree<i8>) {
    for op in ops.iter().take(MAX_OPS) {
        match op {
            Op::Insert(k) => {
                linked.insert(*k);
                array.insert(*k);
            }
            Op::Remove(k) => {
                linked.remove(k);
                array.remove(k);
            }
            Op::FitSize => array.fit_size(),
        }
    }
}

fn same_shape(linked: &LinkedTree<i8>, array: &ArrayTree<i8>) -> bool {
    Order::ALL
        .iter()
        .all(|order| linked.traverse(*order) == array.traverse(*order))
        && linked.stats() == array.stats()
}

quickcheck::quickcheck! {
    fn representations_agree(ops: Vec<Op<i8>>) -> bool {
        let mut linked = LinkedTree::new();
        let mut array = ArrayTree::new();

        do_ops(&ops, &mut linked, &mut array);
        same_shape(&linked, &array)
    }
}

quickcheck::quickcheck! {
    fn in_order_is_sorted_and_distinct(xs: Vec<i8>) -> bool {
        let xs: Vec<i8> = xs.into_iter().take(MAX_OPS).collect();
        let linked: LinkedTree<_> = xs.iter().copied().collect();
        let array: ArrayTree<_> = xs.iter().copied().collect();
        let expected: Vec<i8> = xs.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        linked.in_order() == expected && array.in_order() == expected
    }
}

quickcheck::quickcheck! {
    fn insert_then_remove_is_a_no_op(xs: Vec<i8>, x: i8) -> bool {
        let xs: Vec<i8> = xs.into_iter().take(MAX_OPS).collect();
        let mut linked: LinkedTree<_> = xs.iter().copied().collect();
        let mut array: ArrayTree<_> = xs.iter().copied().collect();
        if linked.contains(&x) {
            return true;
        }
        let linked_before = linked.pre_order();
        let array_before = array.pre_order();

        linked.insert(x);
        linked.remove(&x);
        array.insert(x);
        array.remove(&x);

        linked.pre_order() == linked_before && array.pre_order() == array_before
    }
}

/// Nodes bucketed by how many children they have, read straight off the array slots rather than
/// through either tree's statistics: `[leaves, one child, two children]`.
fn count_by_children(array: &ArrayTree<i8>) -> [usize; 3] {
    let slots = array.as_slice();
    let occupied = |index: usize| matches!(slots.get(index), Some(Some(_)));

    let mut counts = [0; 3];
    for index in (0..slots.len()).filter(|&index| occupied(index)) {
        let children = usize::from(occupied(2 * index + 1)) + usize::from(occupied(2 * index + 2));
        counts[children] += 1;
    }
    counts
}

quickcheck::quickcheck! {
    fn statistics_match_the_slots(ops: Vec<Op<i8>>) -> bool {
        let mut linked = LinkedTree::new();
        let mut array = ArrayTree::new();
        do_ops(&ops, &mut linked, &mut array);

        let [leaves, one_child, two_children] = count_by_children(&array);
        [linked.stats(), array.stats()].iter().all(|stats| {
            stats.leaves == leaves
                && stats.one_child() == one_child
                && stats.two_children == two_children
                && stats.nodes == leaves + one_child + two_children
                && (stats.nodes == 0 || stats.leaves == stats.two_children + 1)
                && (stats.nodes == 0) == (stats.levels == 0)
        })
    }
}
