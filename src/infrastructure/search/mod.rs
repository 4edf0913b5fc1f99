// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Marketplace source module
///
/// One client per external marketplace (Discogs catalog API, eBay Browse
/// API, static deep-link marketplaces) plus the aggregator that fans an
/// artist out across all of them
pub mod aggregator;
pub mod discogs;
pub mod ebay;
pub mod weblinks;
