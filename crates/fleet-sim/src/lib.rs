//! # Fleet Sim - Simulation & Estimation Engine
//!
//! The stateful core of the driver tracking server. Owns the fleet
//! registry, advances drivers toward the head office one step per
//! refresh cycle, derives per-driver travel estimates, and answers
//! canned operator queries.
//!
//! ## Features
//! - Insertion-ordered driver registry with typed lookup errors
//! - Planar step-interpolation movement (one step per refresh)
//! - Pure estimation bundle: distance, ETA, cost, carbon, arrival
//! - ETA-ordered ranking for the dashboard table and chart
//! - Enumerated canned-response table for the chat panel

pub mod chat;
pub mod estimate;
pub mod fleet;
pub mod registry;
pub mod responder;

pub use chat::{ChatLog, ChatMessage, ChatRole};
pub use estimate::{estimate, ArrivalStatus, Estimate, EstimateConfig};
pub use fleet::{DriverSnapshot, Fleet, FleetSnapshot};
pub use registry::{FleetRegistry, HEAD_OFFICE};
pub use responder::{respond, Question};
