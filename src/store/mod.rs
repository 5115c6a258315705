pub mod btree;
pub(crate) mod counters;
pub mod traits;
pub mod tree;

pub use btree::BTreeStore;
pub use traits::{RecordStore, StoreMetrics, Upsert};
pub use tree::{NodeId, TreeIter, TreeStore};
