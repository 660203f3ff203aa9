//! Structural protocol verification for `lode` node trees.
//!
//! A verifier checks that a candidate node matches a named container shape.
//! Every verifier follows the same contract: a boolean verdict plus a
//! per-field breakdown written into a caller-supplied `info` node. Malformed
//! input is a normal outcome reported through the verdict, never an error.
//!
//! ```
//! use lode_blueprint::zfparray;
//! use lode_node::Node;
//!
//! let mut candidate = Node::new();
//! candidate.set(zfparray::HEADER_FIELD_NAME, Node::uint8_array(vec![0; 4]));
//! candidate.set(zfparray::COMPRESSED_DATA_FIELD_NAME, Node::uint8_array(vec![0; 4]));
//!
//! let mut info = Node::new();
//! assert!(zfparray::verify(&candidate, &mut info));
//! ```

pub mod zfparray;

use lode_node::Node;

/// Verify `node` against the named protocol.
///
/// Routes to that protocol's verifier; an unrecognized protocol name clears
/// `info` and fails.
pub fn verify(protocol: &str, node: &Node, info: &mut Node) -> bool {
    match protocol {
        "zfparray" => zfparray::verify(node, info),
        _ => {
            info.reset();
            false
        }
    }
}
