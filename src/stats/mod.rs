//! Dataset model: frame markers, the address dictionary and the profile set.
//!
//! These types are produced by the decoder (see `parser`) and consumed,
//! read-only, by every aggregator.

pub mod dataset;
pub mod dictionary;
pub mod frame;

pub use dataset::{Profile, Stats};
pub use dictionary::{AddressDictionary, Descriptor};
pub use frame::{ExecutionMode, FrameMarker};
