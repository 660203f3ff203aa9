//! End-to-end coverage of zfparray container verification.

use lode_blueprint::zfparray::{self, COMPRESSED_DATA_FIELD_NAME, HEADER_FIELD_NAME};
use lode_node::{DType, Node};
use proptest::prelude::*;

fn set_zfparray_fields(node: &mut Node, header: &[u8], compressed_data: &[u8]) {
    node.set(HEADER_FIELD_NAME, Node::uint8_array(header.to_vec()));
    node.set(
        COMPRESSED_DATA_FIELD_NAME,
        Node::uint8_array(compressed_data.to_vec()),
    );
}

fn zero_filled_candidate() -> Node {
    let mut node = Node::new();
    set_zfparray_fields(&mut node, &[0; 4], &[0; 4]);
    node
}

fn field_flag(info: &Node, name: &str) -> bool {
    info.child(name)
        .expect("info carries every required field")
        .as_boolean()
        .expect("info fields are booleans")
}

#[test]
fn verify_valid_zfparray() {
    let result = zero_filled_candidate();
    assert_eq!(result.child(HEADER_FIELD_NAME).unwrap().dtype(), DType::UInt8);

    let mut info = Node::new();
    assert!(zfparray::verify(&result, &mut info));
    assert!(field_flag(&info, HEADER_FIELD_NAME));
    assert!(field_flag(&info, COMPRESSED_DATA_FIELD_NAME));
}

#[test]
fn verify_invalid_zfparray_without_header() {
    let mut result = zero_filled_candidate();
    let mut info = Node::new();
    assert!(zfparray::verify(&result, &mut info));

    assert!(result.has_child(HEADER_FIELD_NAME));
    result.remove(HEADER_FIELD_NAME);

    assert!(!zfparray::verify(&result, &mut info));
    assert!(!field_flag(&info, HEADER_FIELD_NAME));
    assert!(field_flag(&info, COMPRESSED_DATA_FIELD_NAME));
}

#[test]
fn verify_invalid_zfparray_without_compressed_data() {
    let mut result = zero_filled_candidate();
    let mut info = Node::new();
    assert!(zfparray::verify(&result, &mut info));

    assert!(result.has_child(COMPRESSED_DATA_FIELD_NAME));
    result.remove(COMPRESSED_DATA_FIELD_NAME);

    assert!(!zfparray::verify(&result, &mut info));
    assert!(field_flag(&info, HEADER_FIELD_NAME));
    assert!(!field_flag(&info, COMPRESSED_DATA_FIELD_NAME));
}

#[test]
fn verify_invalid_zfparray_with_incorrect_header_dtype() {
    let mut result = zero_filled_candidate();
    let mut info = Node::new();
    assert!(zfparray::verify(&result, &mut info));

    // Same field name, float64 scalar in place of the byte buffer.
    result.set(HEADER_FIELD_NAME, Node::float64(4.4));

    assert!(!zfparray::verify(&result, &mut info));
    assert!(!field_flag(&info, HEADER_FIELD_NAME));
    assert!(field_flag(&info, COMPRESSED_DATA_FIELD_NAME));
}

#[test]
fn verify_invalid_zfparray_with_incorrect_compressed_data_dtype() {
    let mut result = zero_filled_candidate();
    let mut info = Node::new();
    assert!(zfparray::verify(&result, &mut info));

    result.set(COMPRESSED_DATA_FIELD_NAME, Node::float64(4.4));

    assert!(!zfparray::verify(&result, &mut info));
    assert!(field_flag(&info, HEADER_FIELD_NAME));
    assert!(!field_flag(&info, COMPRESSED_DATA_FIELD_NAME));
}

#[test]
fn verify_rejects_interior_node_field() {
    let mut result = zero_filled_candidate();
    let mut interior = Node::new();
    interior.set("bits", Node::uint8_array(vec![0; 4]));
    result.set(COMPRESSED_DATA_FIELD_NAME, interior);

    let mut info = Node::new();
    assert!(!zfparray::verify(&result, &mut info));
    assert!(field_flag(&info, HEADER_FIELD_NAME));
    assert!(!field_flag(&info, COMPRESSED_DATA_FIELD_NAME));
}

#[test]
fn verify_accepts_zero_length_buffers() {
    let mut result = Node::new();
    set_zfparray_fields(&mut result, &[], &[]);

    let mut info = Node::new();
    assert!(zfparray::verify(&result, &mut info));
}

#[test]
fn verify_ignores_extra_fields() {
    let mut result = zero_filled_candidate();
    result.set("origin", Node::char8_str("sensor-7"));
    result.set("shape", Node::uint64(256));

    let mut info = Node::new();
    assert!(zfparray::verify(&result, &mut info));
    assert_eq!(info.num_children(), 2);
}

#[test]
fn verify_is_idempotent_and_leaves_candidate_untouched() {
    let result = zero_filled_candidate();
    let snapshot = result.clone();

    let mut first = Node::new();
    let mut second = Node::new();
    let verdict_a = zfparray::verify(&result, &mut first);
    let verdict_b = zfparray::verify(&result, &mut second);

    assert_eq!(verdict_a, verdict_b);
    assert_eq!(first, second);
    assert_eq!(result, snapshot);
}

#[test]
fn info_prior_contents_do_not_leak() {
    let result = zero_filled_candidate();
    let mut info = Node::new();
    info.set("stale", Node::boolean(false));

    assert!(zfparray::verify(&result, &mut info));
    assert!(!info.has_child("stale"));
    assert_eq!(info.num_children(), 2);
}

#[test]
fn dispatcher_routes_zfparray() {
    let result = zero_filled_candidate();
    let mut info = Node::new();
    assert!(lode_blueprint::verify("zfparray", &result, &mut info));
    assert!(field_flag(&info, HEADER_FIELD_NAME));
}

#[test]
fn dispatcher_rejects_unknown_protocol() {
    let result = zero_filled_candidate();
    let mut info = Node::new();
    assert!(!lode_blueprint::verify("zfpstream", &result, &mut info));
    assert_eq!(info.num_children(), 0);
}

proptest! {
    #[test]
    fn any_uint8_payloads_verify(
        header in proptest::collection::vec(any::<u8>(), 0..64),
        compressed_data in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut result = Node::new();
        set_zfparray_fields(&mut result, &header, &compressed_data);

        let mut info = Node::new();
        prop_assert!(zfparray::verify(&result, &mut info));
    }

    #[test]
    fn extra_fields_never_change_the_verdict(
        name in "[a-z][a-z0-9_]{0,12}",
        payload in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        prop_assume!(name != HEADER_FIELD_NAME && name != COMPRESSED_DATA_FIELD_NAME);

        let mut result = zero_filled_candidate();
        result.set(name, Node::uint8_array(payload));

        let mut info = Node::new();
        prop_assert!(zfparray::verify(&result, &mut info));
        prop_assert_eq!(info.num_children(), 2);
    }
}
