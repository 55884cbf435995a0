use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The ways a tree can be walked. Passed to [`SearchTree::traverse`](crate::SearchTree::traverse)
/// to pick a traversal at runtime.
///
/// ```
/// use twin_bst::Order;
///
/// let order: Order = "post-order".parse().unwrap();
/// assert_eq!(order, Order::PostOrder);
/// assert_eq!(order.to_string(), "post-order");
/// assert!("sideways".parse::<Order>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
    /// Level by level from the root, left to right within a level.
    BreadthFirst,
}

impl Order {
    /// Every traversal order.
    pub const ALL: [Order; 4] = [
        Order::PreOrder,
        Order::InOrder,
        Order::PostOrder,
        Order::BreadthFirst,
    ];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::PreOrder => "pre-order",
            Order::InOrder => "in-order",
            Order::PostOrder => "post-order",
            Order::BreadthFirst => "breadth-first",
        };
        f.write_str(name)
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pre" | "pre-order" | "preorder" => Ok(Order::PreOrder),
            "in" | "in-order" | "inorder" => Ok(Order::InOrder),
            "post" | "post-order" | "postorder" => Ok(Order::PostOrder),
            "bfs" | "breadth-first" | "level" => Ok(Order::BreadthFirst),
            _ => Err(Error::UnknownOrder(s.to_string())),
        }
    }
}
