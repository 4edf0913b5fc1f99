// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Application module
///
/// Request/response DTOs between the HTTP layer and the domain services
pub mod application;

/// Configuration module
///
/// Handles application settings and environment variables
pub mod config;

/// Domain module
///
/// Core business entities, the marketplace source contract and the
/// merge protocol service
pub mod domain;

/// Infrastructure module
///
/// External integrations: marketplace API clients, rate limiting, OAuth
/// token caching and snapshot persistence
pub mod infrastructure;

/// Presentation module
///
/// HTTP routing and request handlers
pub mod presentation;

/// Utilities module
///
/// Logging setup and shared helpers
pub mod utils;
