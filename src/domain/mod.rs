//! Domain modules (vertical slices): types, wire types, conversions, state.

pub mod coin;
pub mod ohlc;
