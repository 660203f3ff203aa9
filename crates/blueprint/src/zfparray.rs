//! The zfparray container protocol: the shape a compressed-array payload is
//! stored in.
//!
//! A conforming node carries the zfp stream header and the compressed byte
//! stream as two uint8 leaves. Only the container shape is checked here; the
//! payload is never decoded.

use lode_node::Node;

/// Field holding the zfp stream header.
pub const HEADER_FIELD_NAME: &str = "header";

/// Field holding the compressed byte stream.
pub const COMPRESSED_DATA_FIELD_NAME: &str = "compressed_data";

/// Check that `node` is a conforming zfparray container.
///
/// Both required fields must be present and hold uint8 leaf buffers. Buffer
/// lengths and contents are not inspected, and unrelated fields are ignored.
/// `info` is reset and given one boolean per required field, keyed by the
/// field name, on every call, so a caller can tell which field failed. The
/// candidate is never mutated.
pub fn verify(node: &Node, info: &mut Node) -> bool {
    info.reset();

    let header_ok = uint8_field(node, HEADER_FIELD_NAME);
    let data_ok = uint8_field(node, COMPRESSED_DATA_FIELD_NAME);

    info.set(HEADER_FIELD_NAME, Node::boolean(header_ok));
    info.set(COMPRESSED_DATA_FIELD_NAME, Node::boolean(data_ok));

    header_ok && data_ok
}

fn uint8_field(node: &Node, name: &str) -> bool {
    match node.child(name) {
        Some(field) => field.dtype().is_uint8(),
        None => false,
    }
}
