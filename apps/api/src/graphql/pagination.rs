//! Shared pagination utilities for GraphQL resolvers
//!
//! This module provides constants and helper functions for consistent
//! pagination across all query resolvers.

/// Maximum items per page for top-level list queries
pub const MAX_LIMIT: i32 = 100;

/// Maximum items for nested relationship resolvers
pub const MAX_NESTED_LIMIT: i32 = 50;

/// Clamp pagination limit to valid range
#[inline]
pub fn clamp_limit(limit: i32, max: i32) -> i64 {
    limit.clamp(1, max) as i64
}

/// Clamp offset to non-negative
#[inline]
pub fn clamp_offset(offset: i32) -> i64 {
    offset.max(0) as i64
}

/// Apply nested-relation pagination to rows that were loaded in full
///
/// Relation loaders fetch every related row for a key, so paging happens
/// after the batch is distributed.
pub fn paginate<T>(items: Vec<T>, limit: i32, offset: i32) -> Vec<T> {
    let limit = clamp_limit(limit, MAX_NESTED_LIMIT) as usize;
    let offset = clamp_offset(offset) as usize;
    items.into_iter().skip(offset).take(limit).collect()
}
