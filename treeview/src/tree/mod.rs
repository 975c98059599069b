//! Hierarchical multi-select tree model with cascading tri-state checkboxes.
//!
//! The model owns an ordered forest of nodes. Checking a node cascades the
//! new value to every non-disabled descendant and recomputes the derived
//! checked / unchecked / indeterminate state of every ancestor. A text
//! filter computes which nodes are visible (self or any descendant matches)
//! without mutating the tree, and the whole structure is consumed by a
//! renderer as a flat, depth-annotated sequence.
//!
//! # Example
//!
//! ```ignore
//! use treeview::prelude::*;
//!
//! let tree = Treeview::from_specs(vec![
//!     ItemSpec::new("Fruits", 0)
//!         .child(ItemSpec::new("Apple", 1).checked(true))
//!         .child(ItemSpec::new("Banana", 2)),
//! ]);
//!
//! let fruits = tree.find_by_value(&0).unwrap();
//! assert_eq!(tree.state_of(fruits), Ok(TriState::Indeterminate));
//!
//! tree.set_checked(fruits, true).unwrap();
//! assert_eq!(tree.checked_values(), vec![1, 2]);
//!
//! tree.set_filter("ban");
//! for node in tree.flattened() {
//!     println!("{}{}", "  ".repeat(node.depth as usize), node.label);
//! }
//! ```

mod filter;
mod item;
mod node;
mod propagate;
mod state;

pub use item::{ItemSpec, TriState};
pub use node::NodeId;
pub use state::{FlatNode, Treeview, TreeviewId, TreeviewSelection};
