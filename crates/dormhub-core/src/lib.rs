// SPDX-FileCopyrightText: 2026 Dormhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Dormhub portal services.
//!
//! This crate provides the error type, domain types, and the
//! [`ComplaintStore`] trait seam used throughout the Dormhub workspace.

pub mod error;
pub mod store;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DormhubError;
pub use store::ComplaintStore;
pub use types::{
    Complaint, ComplaintId, ComplaintStatus, Department, MessTimetable, NewComplaint, Role,
    SessionId, Severity, TimetableId, TimetableUpload,
};
