//! Hierarchical, self-describing typed-node containers.
//!
//! A [`Node`] is either an interior node (an insertion-ordered mapping from
//! unique field names to child nodes) or a leaf holding a typed buffer: a
//! [`DType`] element tag plus a little-endian byte payload. Consumers read
//! the tree through a small capability-style interface and mutate it only
//! through `set`/`remove`/`reset`.
//!
//! # Example
//!
//! ```
//! use lode_node::{DType, Node};
//!
//! let mut sample = Node::new();
//! sample.set("payload", Node::uint8_array(vec![1, 2, 3]));
//!
//! assert!(sample.has_child("payload"));
//! let payload = sample.child("payload").unwrap();
//! assert_eq!(payload.dtype(), DType::UInt8);
//! assert_eq!(payload.as_uint8_array().unwrap(), &[1, 2, 3]);
//! ```

mod dtype;
mod error;
mod node;

pub use dtype::DType;
pub use error::NodeError;
pub use node::{Leaf, Node};
