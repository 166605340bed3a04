pub type TileResult<T> = Result<T, TileError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("invalid tile shift {shift} (expected 1..={max})")]
    InvalidShift { shift: u32, max: u32 },

    #[error("tile grid must have at least one area per axis (got {areas_width}x{areas_height})")]
    EmptyGrid { areas_width: u32, areas_height: u32 },

    #[error("grid {width}x{height} is not a multiple of the {tile}x{tile} tile size")]
    RaggedGrid { width: u32, height: u32, tile: u32 },

    #[error("grid of {areas_width}x{areas_height} areas overflows the address range")]
    Overflow { areas_width: u32, areas_height: u32 },

    #[error("coordinate ({x}, {y}) outside {width}x{height} grid")]
    CoordOutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    #[error("offset {offset} outside storage of {size} cells")]
    OffsetOutOfRange { offset: usize, size: usize },

    #[error("area {area} outside tile grid of {count} areas")]
    AreaOutOfRange { area: usize, count: usize },

    #[error("buffer holds {actual} cells, address space needs {expected}")]
    BufferSize { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let err = TileError::CoordOutOfBounds {
            x: 56,
            y: 3,
            width: 56,
            height: 24,
        };
        assert_eq!(err.to_string(), "coordinate (56, 3) outside 56x24 grid");

        let err = TileError::InvalidShift { shift: 0, max: 15 };
        assert!(err.to_string().contains("invalid tile shift 0"));

        let err = TileError::BufferSize {
            expected: 1344,
            actual: 1000,
        };
        assert!(err.to_string().contains("needs 1344"));
    }
}
