//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `debugmode` – presence enables physics debug drawing and the restart key
//! - `gameconfig` – gameplay tuning loaded from an INI file
//! - `gamestate` – authoritative and pending progression state
//! - `handles` – engine handle to entity lookup
//! - `input` – per-frame engine report and derived key state
//! - `level` – the level's object layer
//! - `lock` – lock-and-key puzzle state
//! - `scheduler` – delayed, cancellable actions
//! - `systemsstore` – registry of one-shot systems by name
//! - `worldtime` – session time and delta
pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod handles;
pub mod input;
pub mod level;
pub mod lock;
pub mod scheduler;
pub mod systemsstore;
pub mod worldtime;
