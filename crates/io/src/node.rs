//! Simulation nodes as a data source.

use crate::element::NcElement;

/// A spatial node exposing indexed field values and its coordinates.
pub trait Node {
    /// Element type of the node's values.
    type Value: NcElement;

    /// Value of field `index`, or `None` if the node has no such field.
    fn field(&self, index: usize) -> Option<Self::Value>;

    /// Number of fields carried by the node.
    fn n_fields(&self) -> usize;

    /// Latitude.
    fn lat(&self) -> Self::Value;

    /// Longitude.
    fn lon(&self) -> Self::Value;
}

/// Which value of each node to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSelector {
    /// The field at this index.
    Index(usize),
    /// The node latitude.
    Lat,
    /// The node longitude.
    Lon,
}

/// A plain node with coordinates and a field vector.
#[derive(Debug, Clone, PartialEq)]
pub struct GridNode<T> {
    lat: T,
    lon: T,
    fields: Vec<T>,
}

impl<T> GridNode<T> {
    /// Create a node.
    pub fn new(lat: T, lon: T, fields: Vec<T>) -> Self {
        Self { lat, lon, fields }
    }

    /// All field values.
    pub fn fields(&self) -> &[T] {
        &self.fields
    }
}

impl<T: NcElement> Node for GridNode<T> {
    type Value = T;

    fn field(&self, index: usize) -> Option<T> {
        self.fields.get(index).copied()
    }

    fn n_fields(&self) -> usize {
        self.fields.len()
    }

    fn lat(&self) -> T {
        self.lat
    }

    fn lon(&self) -> T {
        self.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_node_accessors() {
        let n = GridNode::new(10.0f64, -20.0, vec![1.0, 2.0]);
        assert_eq!(n.lat(), 10.0);
        assert_eq!(n.lon(), -20.0);
        assert_eq!(n.field(1), Some(2.0));
        assert_eq!(n.field(2), None);
        assert_eq!(n.n_fields(), 2);
        assert_eq!(n.fields(), &[1.0, 2.0]);
    }
}
