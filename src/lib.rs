// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Secret Echo Server
//!
//! Serves the current value of a single AWS Secrets Manager secret on
//! `GET /`. The secret identifier is read from the environment at startup and
//! the value is fetched fresh on every request.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers and router (Axum)
//! - `config` - Environment configuration
//! - `resolver` - Secret store lookup (AWS Secrets Manager)
//! - `telemetry` - Tracing setup

pub mod api;
pub mod config;
pub mod error;
pub mod resolver;
pub mod state;
pub mod telemetry;
