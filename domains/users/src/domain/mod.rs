//! Users domain layer: entities

pub mod entities;
