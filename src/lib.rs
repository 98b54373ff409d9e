// mpcreator: GitLab main-project builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |           fill / pull / list / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, env, CLI overrides |
//!              '-------------+-------------'
//!                            v
//!                       mainproject
//!                fill (reconcile)  pull (branch-aware)
//!                   |                      |
//!                   v                      |
//!               traverse --> filter        |
//!                   |                      |
//!                   v                      v
//!                gitlab                   git
//!            REST v4 (reqwest)      gix reads / CLI writes
//!
//!   +-----------------------------------------+
//!   |  foundation        error, logging       |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod gitlab;
pub mod logging;
pub mod mainproject;
pub mod traverse;
