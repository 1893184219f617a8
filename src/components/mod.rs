//! ECS components for entities.
//!
//! This module groups the component types attached to the entities of a
//! level: the player avatar and the collectible objects placed on the level's
//! object layer.
//!
//! Submodules overview:
//! - [`collectible`] – coin/key/block/checkpoint objects and their engine handles
//! - [`mapposition`] – world-space position of an entity
//! - [`player`] – player marker, score and locomotion labels
//! - [`rigidbody`] – kinematic mirror of the engine body and motion commands

pub mod collectible;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
