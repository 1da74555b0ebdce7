//! The [`Cell`] type — persistent kind plus transient search marks.

/// What the user (or the maze generator) placed on a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
}

impl CellKind {
    /// Whether this kind is one of the two search endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// A single grid cell.
///
/// `kind` survives between searches. `visited`, `frontier` and `on_path` are
/// owned by the running search and cleared before the next one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub kind: CellKind,
    pub visited: bool,
    /// Currently being examined.
    pub frontier: bool,
    pub on_path: bool,
}

impl Cell {
    /// An empty cell with no marks.
    pub const EMPTY: Self = Self {
        kind: CellKind::Empty,
        visited: false,
        frontier: false,
        on_path: false,
    };

    /// A wall cell with no marks.
    pub const WALL: Self = Self::EMPTY.with_kind(CellKind::Wall);

    /// Set the kind (builder).
    #[inline]
    pub const fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self.kind, CellKind::Wall)
    }

    #[inline]
    pub const fn is_endpoint(self) -> bool {
        self.kind.is_endpoint()
    }

    /// Whether any transient search mark is set.
    #[inline]
    pub const fn is_marked(self) -> bool {
        self.visited || self.frontier || self.on_path
    }

    /// Drop all transient marks, keeping the kind.
    #[inline]
    pub fn clear_marks(&mut self) {
        self.visited = false;
        self.frontier = false;
        self.on_path = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_and_unmarked() {
        let c = Cell::default();
        assert_eq!(c, Cell::EMPTY);
        assert!(!c.is_marked());
        assert!(!c.is_wall());
    }

    #[test]
    fn clear_marks_keeps_kind() {
        let mut c = Cell {
            kind: CellKind::Wall,
            visited: true,
            frontier: true,
            on_path: true,
        };
        c.clear_marks();
        assert_eq!(c, Cell::WALL);
    }

    #[test]
    fn endpoints() {
        assert!(CellKind::Start.is_endpoint());
        assert!(CellKind::End.is_endpoint());
        assert!(!CellKind::Wall.is_endpoint());
        assert!(!Cell::EMPTY.is_endpoint());
    }
}
