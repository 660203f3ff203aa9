//! The hierarchical node container.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

use crate::{DType, NodeError};

// ── Leaf ──────────────────────────────────────────────────────────────────

/// A typed leaf buffer: element tag plus little-endian payload bytes.
///
/// Leaves are built through the constructors on [`Node`], which keep the
/// payload a whole multiple of the element size.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    dtype: DType,
    data: Vec<u8>,
}

impl Leaf {
    fn new(dtype: DType, data: Vec<u8>) -> Self {
        Self { dtype, data }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn num_elements(&self) -> usize {
        match self.dtype.element_size() {
            0 => 0,
            size => self.data.len() / size,
        }
    }

    /// The bytes of one element.
    fn element(&self, index: usize) -> &[u8] {
        let size = self.dtype.element_size();
        &self.data[index * size..(index + 1) * size]
    }

    fn element_view(&self, index: usize) -> Value {
        let e = self.element(index);
        match self.dtype {
            DType::Int8 => Value::from(e[0] as i8),
            DType::Int16 => Value::from(i16::from_le_bytes([e[0], e[1]])),
            DType::Int32 => Value::from(i32::from_le_bytes([e[0], e[1], e[2], e[3]])),
            DType::Int64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(e);
                Value::from(i64::from_le_bytes(b))
            }
            DType::UInt8 => Value::from(e[0]),
            DType::UInt16 => Value::from(u16::from_le_bytes([e[0], e[1]])),
            DType::UInt32 => Value::from(u32::from_le_bytes([e[0], e[1], e[2], e[3]])),
            DType::UInt64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(e);
                Value::from(u64::from_le_bytes(b))
            }
            DType::Float32 => Value::from(f32::from_le_bytes([e[0], e[1], e[2], e[3]]) as f64),
            DType::Float64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(e);
                Value::from(f64::from_le_bytes(b))
            }
            // Non-numeric kinds are projected whole, not per element.
            DType::Object | DType::Bool | DType::Char8Str => Value::Null,
        }
    }

    fn view(&self) -> Value {
        match self.dtype {
            DType::Object => Value::Null,
            DType::Bool => Value::Bool(self.data.first().copied().unwrap_or(0) != 0),
            DType::Char8Str => Value::String(String::from_utf8_lossy(&self.data).into_owned()),
            _ => {
                let n = self.num_elements();
                if n == 1 {
                    self.element_view(0)
                } else {
                    Value::Array((0..n).map(|i| self.element_view(i)).collect())
                }
            }
        }
    }
}

// ── Node ──────────────────────────────────────────────────────────────────

/// A hierarchical, self-describing container: either an interior mapping of
/// unique field names to child nodes, or a leaf holding a typed buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(IndexMap<String, Node>),
    Leaf(Leaf),
}

impl Node {
    /// An empty interior node.
    pub fn new() -> Self {
        Self::Object(IndexMap::new())
    }

    // ── Leaf constructors ─────────────────────────────────────────────────

    pub fn uint8_array(data: impl Into<Vec<u8>>) -> Self {
        Self::Leaf(Leaf::new(DType::UInt8, data.into()))
    }

    pub fn float64_array(values: &[f64]) -> Self {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::Leaf(Leaf::new(DType::Float64, data))
    }

    pub fn boolean(value: bool) -> Self {
        Self::Leaf(Leaf::new(DType::Bool, vec![u8::from(value)]))
    }

    pub fn int64(value: i64) -> Self {
        Self::Leaf(Leaf::new(DType::Int64, value.to_le_bytes().to_vec()))
    }

    pub fn uint64(value: u64) -> Self {
        Self::Leaf(Leaf::new(DType::UInt64, value.to_le_bytes().to_vec()))
    }

    pub fn float32(value: f32) -> Self {
        Self::Leaf(Leaf::new(DType::Float32, value.to_le_bytes().to_vec()))
    }

    pub fn float64(value: f64) -> Self {
        Self::Leaf(Leaf::new(DType::Float64, value.to_le_bytes().to_vec()))
    }

    pub fn char8_str(value: &str) -> Self {
        Self::Leaf(Leaf::new(DType::Char8Str, value.as_bytes().to_vec()))
    }

    // ── Kind inspection ───────────────────────────────────────────────────

    pub fn dtype(&self) -> DType {
        match self {
            Self::Object(_) => DType::Object,
            Self::Leaf(leaf) => leaf.dtype(),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Payload size in bytes (0 for interior nodes).
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Object(_) => 0,
            Self::Leaf(leaf) => leaf.data().len(),
        }
    }

    /// Number of buffer elements (0 for interior nodes).
    pub fn num_elements(&self) -> usize {
        match self {
            Self::Object(_) => 0,
            Self::Leaf(leaf) => leaf.num_elements(),
        }
    }

    // ── Child access ──────────────────────────────────────────────────────

    pub fn num_children(&self) -> usize {
        match self {
            Self::Object(map) => map.len(),
            Self::Leaf(_) => 0,
        }
    }

    pub fn has_child(&self, name: &str) -> bool {
        match self {
            Self::Object(map) => map.contains_key(name),
            Self::Leaf(_) => false,
        }
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        match self {
            Self::Object(map) => map.get(name),
            Self::Leaf(_) => None,
        }
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        match self {
            Self::Object(map) => map.get_mut(name),
            Self::Leaf(_) => None,
        }
    }

    /// Like [`child`](Self::child), with a typed error for the failure cases.
    pub fn fetch(&self, name: &str) -> Result<&Node, NodeError> {
        match self {
            Self::Object(map) => map
                .get(name)
                .ok_or_else(|| NodeError::NoSuchChild(name.to_string())),
            Self::Leaf(_) => Err(NodeError::NotAnObject),
        }
    }

    /// Children in insertion order. Empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        let map = match self {
            Self::Object(map) => Some(map),
            Self::Leaf(_) => None,
        };
        map.into_iter()
            .flat_map(|m| m.iter().map(|(name, child)| (name.as_str(), child)))
    }

    /// Insert or replace a child. Replacing keeps the field's insertion
    /// position. A leaf receiver is cleared back to an interior node first.
    pub fn set(&mut self, name: impl Into<String>, child: Node) {
        if self.is_leaf() {
            self.reset();
        }
        if let Self::Object(map) = self {
            map.insert(name.into(), child);
        }
    }

    /// Delete a named child, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        match self {
            Self::Object(map) => map.shift_remove(name),
            Self::Leaf(_) => None,
        }
    }

    /// Clear back to an empty interior node.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ── Typed reads ───────────────────────────────────────────────────────

    fn leaf_of(&self, expected: DType) -> Result<&Leaf, NodeError> {
        match self {
            Self::Leaf(leaf) if leaf.dtype() == expected => Ok(leaf),
            other => Err(NodeError::TypeMismatch {
                expected,
                actual: other.dtype(),
            }),
        }
    }

    pub fn as_uint8_array(&self) -> Result<&[u8], NodeError> {
        Ok(self.leaf_of(DType::UInt8)?.data())
    }

    pub fn as_boolean(&self) -> Result<bool, NodeError> {
        let leaf = self.leaf_of(DType::Bool)?;
        Ok(leaf.data().first().copied().unwrap_or(0) != 0)
    }

    pub fn as_int64(&self) -> Result<i64, NodeError> {
        let leaf = self.leaf_of(DType::Int64)?;
        let mut b = [0u8; 8];
        b.copy_from_slice(leaf.element(0));
        Ok(i64::from_le_bytes(b))
    }

    pub fn as_uint64(&self) -> Result<u64, NodeError> {
        let leaf = self.leaf_of(DType::UInt64)?;
        let mut b = [0u8; 8];
        b.copy_from_slice(leaf.element(0));
        Ok(u64::from_le_bytes(b))
    }

    pub fn as_float32(&self) -> Result<f32, NodeError> {
        let leaf = self.leaf_of(DType::Float32)?;
        let mut b = [0u8; 4];
        b.copy_from_slice(leaf.element(0));
        Ok(f32::from_le_bytes(b))
    }

    pub fn as_float64(&self) -> Result<f64, NodeError> {
        let leaf = self.leaf_of(DType::Float64)?;
        let mut b = [0u8; 8];
        b.copy_from_slice(leaf.element(0));
        Ok(f64::from_le_bytes(b))
    }

    pub fn as_char8_str(&self) -> Result<&str, NodeError> {
        let leaf = self.leaf_of(DType::Char8Str)?;
        std::str::from_utf8(leaf.data()).map_err(|_| NodeError::InvalidUtf8)
    }

    // ── View ──────────────────────────────────────────────────────────────

    /// JSON projection of the tree. Interior nodes become objects in
    /// insertion order; single-element numeric leaves print as one value,
    /// multi-element leaves as arrays.
    pub fn view(&self) -> Value {
        match self {
            Self::Object(map) => {
                let mut out = serde_json::Map::new();
                for (name, child) in map {
                    out.insert(name.clone(), child.view());
                }
                Value::Object(out)
            }
            Self::Leaf(leaf) => leaf.view(),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view())
    }
}
