//! Shared configuration types used by the simulation core and the UI.

pub mod scene;
