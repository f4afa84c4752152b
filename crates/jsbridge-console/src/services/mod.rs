// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — configuration, command table and background work for the
// console host.

pub mod commands;
pub mod console_services;
pub mod data_dir;
