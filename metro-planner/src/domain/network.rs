//! The metro network as a distance matrix.

use super::{MAX_STATIONS, NetworkError, Path, Station};

/// Direct-edge distances between stations, in kilometres.
///
/// Entry `(i, j)` is the length of the direct line from station `i` to
/// station `j`, or `None` when no direct line exists. The matrix is not
/// required to be symmetric.
///
/// # Invariants
///
/// - At least one and at most 26 stations
/// - Square: one row per station, one entry per station in each row
/// - Zero diagonal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<Option<u32>>>,
}

impl DistanceMatrix {
    /// Build a matrix from rows, validating its shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_planner::domain::{DistanceMatrix, Station};
    ///
    /// let matrix = DistanceMatrix::new(vec![
    ///     vec![Some(0), Some(4)],
    ///     vec![Some(4), Some(0)],
    /// ]).unwrap();
    ///
    /// let a = Station::parse("A").unwrap();
    /// let b = Station::parse("B").unwrap();
    /// assert_eq!(matrix.distance(a, b), Some(4));
    ///
    /// // A station must be zero distance from itself
    /// assert!(DistanceMatrix::new(vec![vec![Some(1)]]).is_err());
    /// ```
    pub fn new(rows: Vec<Vec<Option<u32>>>) -> Result<Self, NetworkError> {
        let n = rows.len();
        if n == 0 {
            return Err(NetworkError::Empty);
        }
        if n > MAX_STATIONS {
            return Err(NetworkError::TooManyStations(n));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(NetworkError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            if row[i] != Some(0) {
                return Err(NetworkError::NonZeroDiagonal((b'A' + i as u8) as char));
            }
        }

        Ok(Self { rows })
    }

    /// The six-station network the booking office was built around.
    pub fn reference() -> Self {
        const X: Option<u32> = None;
        let rows = vec![
            vec![Some(0), Some(10), Some(22), X, Some(8), X],
            vec![Some(10), Some(0), Some(15), Some(9), X, Some(7)],
            vec![Some(22), Some(15), Some(0), Some(9), X, X],
            vec![X, Some(9), Some(9), Some(0), Some(5), Some(12)],
            vec![Some(8), X, X, Some(5), Some(0), Some(16)],
            vec![X, Some(7), X, Some(12), Some(16), Some(0)],
        ];
        Self { rows }
    }

    /// Returns the number of stations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: a matrix holds at least one station.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if the station is part of this network.
    pub fn contains(&self, station: Station) -> bool {
        station.index() < self.len()
    }

    /// Look up the station at `index`, if it is part of this network.
    pub fn station(&self, index: usize) -> Option<Station> {
        if index >= self.len() {
            return None;
        }
        Station::from_index(index).ok()
    }

    /// Iterate over every station in index order.
    pub fn stations(&self) -> impl Iterator<Item = Station> + '_ {
        (0..self.len()).filter_map(|i| Station::from_index(i).ok())
    }

    /// Direct distance from one station to another, if a line exists.
    ///
    /// Returns `None` for stations outside the network.
    pub fn distance(&self, from: Station, to: Station) -> Option<u32> {
        *self.rows.get(from.index())?.get(to.index())?
    }

    /// Iterate over the direct neighbours of a station with their distances.
    pub fn neighbours(&self, from: Station) -> impl Iterator<Item = (Station, u32)> + '_ {
        self.rows
            .get(from.index())
            .into_iter()
            .flat_map(|row| row.iter().enumerate())
            .filter(move |(j, _)| *j != from.index())
            .filter_map(|(j, d)| Some((Station::from_index(j).ok()?, (*d)?)))
    }

    /// Total length of a path in kilometres.
    ///
    /// Returns `None` if any hop has no direct line.
    pub fn path_length(&self, path: &Path) -> Option<u64> {
        path.hops()
            .map(|(from, to)| self.distance(from, to).map(u64::from))
            .sum()
    }
}

impl TryFrom<Vec<Vec<Option<u32>>>> for DistanceMatrix {
    type Error = NetworkError;

    fn try_from(rows: Vec<Vec<Option<u32>>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(label: &str) -> Station {
        Station::parse(label).unwrap()
    }

    #[test]
    fn reference_is_valid() {
        let reference = DistanceMatrix::reference();
        assert_eq!(DistanceMatrix::new(reference.rows.clone()), Ok(reference));
    }

    #[test]
    fn reference_distances() {
        let m = DistanceMatrix::reference();
        assert_eq!(m.len(), 6);
        assert_eq!(m.distance(s("A"), s("E")), Some(8));
        assert_eq!(m.distance(s("D"), s("E")), Some(5));
        assert_eq!(m.distance(s("A"), s("D")), None);
        assert_eq!(m.distance(s("C"), s("C")), Some(0));
    }

    #[test]
    fn reference_is_symmetric() {
        let m = DistanceMatrix::reference();
        for a in m.stations() {
            for b in m.stations() {
                assert_eq!(m.distance(a, b), m.distance(b, a));
            }
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(DistanceMatrix::new(vec![]), Err(NetworkError::Empty));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = DistanceMatrix::new(vec![vec![Some(0), Some(1)], vec![Some(1)]]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn rejects_missing_self_distance() {
        let err = DistanceMatrix::new(vec![vec![Some(0), None], vec![None, None]]).unwrap_err();
        assert_eq!(err, NetworkError::NonZeroDiagonal('B'));
    }

    #[test]
    fn rejects_too_many_stations() {
        let n = MAX_STATIONS + 1;
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (i == j).then_some(0)).collect())
            .collect();
        assert_eq!(
            DistanceMatrix::new(rows),
            Err(NetworkError::TooManyStations(27))
        );
    }

    #[test]
    fn asymmetric_allowed() {
        let m = DistanceMatrix::new(vec![vec![Some(0), Some(3)], vec![None, Some(0)]]).unwrap();
        assert_eq!(m.distance(s("A"), s("B")), Some(3));
        assert_eq!(m.distance(s("B"), s("A")), None);
    }

    #[test]
    fn station_lookup() {
        let m = DistanceMatrix::reference();
        assert_eq!(m.station(5), Some(s("F")));
        assert_eq!(m.station(6), None);
        assert!(m.contains(s("F")));
        assert!(!m.contains(s("G")));
        assert_eq!(m.distance(s("G"), s("A")), None);
    }

    #[test]
    fn stations_in_order() {
        let labels: String = DistanceMatrix::reference()
            .stations()
            .map(|st| st.label())
            .collect();
        assert_eq!(labels, "ABCDEF");
    }

    #[test]
    fn neighbours_skip_self_and_missing() {
        let m = DistanceMatrix::reference();
        let from_e: Vec<_> = m.neighbours(s("E")).collect();
        assert_eq!(from_e, vec![(s("A"), 8), (s("D"), 5), (s("F"), 16)]);
    }

    #[test]
    fn path_length_sums_hops() {
        let m = DistanceMatrix::reference();
        let path = Path::new(vec![s("A"), s("E"), s("D")]).unwrap();
        assert_eq!(m.path_length(&path), Some(13));
        assert_eq!(m.path_length(&Path::single(s("B"))), Some(0));

        let broken = Path::new(vec![s("A"), s("D")]).unwrap();
        assert_eq!(m.path_length(&broken), None);
    }
}
