// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Configuration module
///
/// Loads application settings from files and environment variables
pub mod settings;
