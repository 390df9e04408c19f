// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core environment types shared by translation, diagnostics and launch.
//!
//! ```text
//!    core
//!     |
//!     v
//!    env
//!     |
//!   Env  ResolvedEnv
//!   current_env()
//! ```

pub mod env;
