// Adapters layer: concrete implementations of the domain ports (clock, slot stores).

pub mod clock;
pub mod store;
