//! Shared primitive types used across the entire engine.

/// A stable, unique identifier for a complaint.
pub type ComplaintId = String;

/// The reporting user's identifier. Owned by the surrounding
/// application; the engine only carries it through.
pub type UserId = String;
