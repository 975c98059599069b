pub mod config;
pub mod error;
pub mod tree;

pub use tree::{Treeview, TreeviewId};

pub mod prelude {
    pub use crate::config::{CheckedScope, FilterMode, TreeviewConfig};
    pub use crate::error::TreeviewError;
    pub use crate::tree::{
        FlatNode, ItemSpec, NodeId, TreeviewSelection, Treeview, TreeviewId, TriState,
    };
}
