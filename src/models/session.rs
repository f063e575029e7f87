// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Unified workout session history, normalized across weights, cardio and
//! mobility sources by the session services. Read-only to this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SessionKind {
    Weights,
    Cardio,
    Mobility,
}

/// One completed or in-progress workout occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UnifiedSession {
    pub id: String,
    pub user_id: String,
    pub kind: SessionKind,
    /// Absolute start instant; bucketing into calendar days is done per the
    /// viewer's timezone, never from the UTC date directly.
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub started_at: DateTime<Utc>,
    /// None while the session is still in progress
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub completed_at: Option<DateTime<Utc>>,
}

impl UnifiedSession {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
