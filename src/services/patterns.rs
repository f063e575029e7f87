// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Default split patterns used to seed a new user's schedule.
//!
//! Patterns are plain lookup tables: 7 slots, each either a rest marker or an
//! index into the user's ordered weights-day definitions. A plan identifier
//! resolves first; if it is unknown or absent, the number of available
//! definitions picks a fallback (2 = Upper/Lower, 3 = Push/Pull/Legs), and
//! anything else lands on the 3-day PPL pattern unconditionally.

use crate::models::{NewAssignment, WorkoutDayDefinition};

/// One slot of a 7-day pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSlot {
    Rest,
    /// Index into the user's ordered weights-day definitions
    Workout(usize),
}

use PatternSlot::{Rest, Workout};

/// Push/Pull/Legs, run twice with one rest day.
pub const PPL: [PatternSlot; 7] = [
    Workout(0),
    Workout(1),
    Workout(2),
    Rest,
    Workout(0),
    Workout(1),
    Workout(2),
];

/// Upper/Lower, twice a week.
pub const UPPER_LOWER: [PatternSlot; 7] = [
    Workout(0),
    Workout(1),
    Rest,
    Workout(0),
    Workout(1),
    Rest,
    Rest,
];

/// Three full-body sessions.
pub const FULL_BODY: [PatternSlot; 7] = [
    Workout(0),
    Rest,
    Workout(0),
    Rest,
    Workout(0),
    Rest,
    Rest,
];

/// Classic 5-day body-part split.
pub const BRO_SPLIT: [PatternSlot; 7] = [
    Workout(0),
    Workout(1),
    Workout(2),
    Workout(3),
    Workout(4),
    Rest,
    Rest,
];

/// Arnold split: three days run twice, one rest day.
pub const ARNOLD: [PatternSlot; 7] = [
    Workout(0),
    Workout(1),
    Workout(2),
    Workout(0),
    Workout(1),
    Workout(2),
    Rest,
];

/// Pattern for a known split-plan identifier.
pub fn pattern_for_plan(plan_id: &str) -> Option<&'static [PatternSlot; 7]> {
    match plan_id.to_lowercase().as_str() {
        "ppl" | "push_pull_legs" => Some(&PPL),
        "upper_lower" => Some(&UPPER_LOWER),
        "full_body" => Some(&FULL_BODY),
        "bro_split" => Some(&BRO_SPLIT),
        "arnold" => Some(&ARNOLD),
        _ => None,
    }
}

/// Fallback pattern by number of available weights-day definitions.
pub fn pattern_for_day_count(count: usize) -> &'static [PatternSlot; 7] {
    match count {
        2 => &UPPER_LOWER,
        3 => &PPL,
        // No better information: default to the 3-day pattern.
        _ => &PPL,
    }
}

/// Resolve a pattern from an optional plan id, falling back by day count.
pub fn resolve_pattern(
    plan_id: Option<&str>,
    definition_count: usize,
) -> &'static [PatternSlot; 7] {
    plan_id
        .and_then(pattern_for_plan)
        .unwrap_or_else(|| pattern_for_day_count(definition_count))
}

/// Build the seven seed assignments for days 1..=7.
///
/// A workout index past the end of `definitions` (the pattern expects more
/// days than the user has) degrades that slot to a rest day.
pub fn build_default_assignments(
    user_id: &str,
    pattern: &[PatternSlot; 7],
    definitions: &[WorkoutDayDefinition],
) -> Vec<NewAssignment> {
    pattern
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let day_number = index as u32 + 1;
            match slot {
                Rest => NewAssignment::rest(user_id, day_number),
                Workout(def_index) => match definitions.get(*def_index) {
                    Some(definition) => NewAssignment {
                        user_id: user_id.to_string(),
                        day_number,
                        is_rest_day: false,
                        workout_day_ref: Some(definition.id.clone()),
                        template_ref: None,
                        // Seed rows carry no ordering value so first-run
                        // seeding works before the ordering-column migration;
                        // readers normalize the missing value to 0.
                        sort_order: None,
                    },
                    None => NewAssignment::rest(user_id, day_number),
                },
            }
        })
        .collect()
}
