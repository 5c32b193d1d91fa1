//! Alldun: photo-proof task tracking.
//!
//! This crate provides the task lifecycle engine behind a personal task
//! tracker where tasks are completed by uploading photos inside short,
//! countdown-bounded capture windows, and the feed those photos are shared
//! to.
//!
//! # Architecture
//!
//! Alldun follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, tokio)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, capture sessions, reminders, calendar import
//! - [`feed`]: Feed posts built from task proofs

pub mod feed;
pub mod task;
