use thiserror::Error;

/// Errors raised when a room or movement configuration would break generation invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("room extent range is empty: {min}..={max}")]
    EmptyExtentRange { min: i32, max: i32 },

    #[error("room extent {extent} leaves no interior for pillar margin {margin}")]
    NoInterior { extent: i32, margin: i32 },

    #[error("room height {height} cannot hold a block at y = {top}")]
    TooShort { height: i32, top: i32 },

    #[error("movement pad {pad} leaves no walkable area in a {extent}-block room")]
    PadTooLarge { pad: f32, extent: i32 },

    #[error("spawn offset {offset} does not clear the portal trigger radius {radius}")]
    SpawnInsideTrigger { offset: f32, radius: f32 },

    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },
}
