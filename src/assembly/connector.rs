use crate::math::{Point, Real};

/// A connector between two overlapping objects.
///
/// Exactly one record is produced per overlapping unordered pair of objects. The host turns it
/// into a marker placed at `location` and a breakable constraint between both objects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConnectorRecord {
    /// World-space location of the connector.
    pub location: Point<Real>,
    /// Name of the first connected object.
    pub object1: String,
    /// Name of the second connected object. It comes after `object1` in the generator input.
    pub object2: String,
}

impl ConnectorRecord {
    /// Creates a new connector record.
    pub fn new(
        location: Point<Real>,
        object1: impl Into<String>,
        object2: impl Into<String>,
    ) -> Self {
        Self {
            location,
            object1: object1.into(),
            object2: object2.into(),
        }
    }

    /// The name of the connector marker: `"{object1}_{object2}"`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.object1, self.object2)
    }
}

/// The connectors generated for one collection of objects.
///
/// This is the output accumulator of [`StructureGenerator::generate_into`](super::StructureGenerator::generate_into).
/// It is cleared at the start of each generation, replacing the connectors of the previous run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConnectorSet {
    records: Vec<ConnectorRecord>,
}

impl ConnectorSet {
    /// An empty set of connectors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every connector from this set.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Appends a connector to this set.
    pub fn push(&mut self, record: ConnectorRecord) {
        self.records.push(record);
    }

    /// The number of connectors.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Does this set contain no connector?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates through the connectors, in generation order.
    pub fn iter(&self) -> core::slice::Iter<'_, ConnectorRecord> {
        self.records.iter()
    }

    /// The connectors, in generation order.
    pub fn records(&self) -> &[ConnectorRecord] {
        &self.records
    }

    /// Consumes `self` and returns its connectors.
    pub fn into_records(self) -> Vec<ConnectorRecord> {
        self.records
    }
}

impl Extend<ConnectorRecord> for ConnectorSet {
    fn extend<T: IntoIterator<Item = ConnectorRecord>>(&mut self, iter: T) {
        self.records.extend(iter)
    }
}

impl<'a> IntoIterator for &'a ConnectorSet {
    type Item = &'a ConnectorRecord;
    type IntoIter = core::slice::Iter<'a, ConnectorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::{ConnectorRecord, ConnectorSet};
    use crate::math::Point;

    #[test]
    fn record_name() {
        let record = ConnectorRecord::new(Point::origin(), "Cube", "Cube.001");
        assert_eq!(record.name(), "Cube_Cube.001");
    }

    #[test]
    fn reset_clears_previous_run() {
        let mut set = ConnectorSet::new();
        set.push(ConnectorRecord::new(Point::origin(), "a", "b"));
        set.extend([ConnectorRecord::new(Point::origin(), "a", "c")]);
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().map(|r| r.name()).collect::<Vec<_>>(),
            ["a_b", "a_c"]
        );

        set.reset();
        assert!(set.is_empty());
    }
}
