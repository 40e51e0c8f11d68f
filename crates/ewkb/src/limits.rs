//! Wire-format constants and decoder limits.

/// Header length without SRID: byte order + type word.
pub const HEADER_LEN: usize = 5;

/// Header length with SRID.
pub const HEADER_WITH_SRID_LEN: usize = 9;

/// Length of a sequence count prefix.
pub const COUNT_LEN: usize = 4;

/// Length of one ordinate.
pub const ORDINATE_LEN: usize = 8;

/// Maximum nesting depth of geometry collections accepted by the decoder.
///
/// The top-level value is depth 0; each collection level adds one.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Maximum number of elements in one sequence (the count prefix is a u32).
pub const MAX_SEQUENCE_LEN: usize = u32::MAX as usize;
