//! Practice session records and time-window statistics.
//!
//! Sessions are append-only. Each one carries a copy of the drill name as it
//! was when the session ran, and statistics group by that copy, so renaming
//! or deleting a drill never rewrites history.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::drill::{Drill, DrillId};
use super::EpochMillis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A completed run, as handed over by the application when it ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    pub drill_id: DrillId,
    pub drill_name: String,
    pub time_started: EpochMillis,
    pub total_session_time_millis: i64,
    pub prompt_count: u32,
    pub milliseconds_per_prompt: u64,
    pub beats_per_prompt: u32,
    pub tempo: u32,
}

impl SessionInput {
    /// Session for `drill`, copying its current name and timing.
    pub fn for_drill(
        drill: &Drill,
        time_started: EpochMillis,
        total_session_time_millis: i64,
        prompt_count: u32,
    ) -> Self {
        Self {
            drill_id: drill.id,
            drill_name: drill.name.clone(),
            time_started,
            total_session_time_millis,
            prompt_count,
            milliseconds_per_prompt: drill.configuration.milliseconds_per_prompt(),
            beats_per_prompt: drill.configuration.beats_per_prompt,
            tempo: drill.configuration.tempo,
        }
    }
}

/// A stored session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    #[serde(flatten)]
    pub record: SessionInput,
}

/// Which sessions a statistics query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub drill_id: Option<DrillId>,
    pub start: EpochMillis,
    /// Inclusive. `None` leaves the window open-ended.
    pub end: Option<EpochMillis>,
}

impl StatsQuery {
    pub const fn since(start: EpochMillis) -> Self {
        Self {
            drill_id: None,
            start,
            end: None,
        }
    }

    pub const fn until(mut self, end: EpochMillis) -> Self {
        self.end = Some(end);
        self
    }

    pub const fn for_drill(mut self, drill_id: DrillId) -> Self {
        self.drill_id = Some(drill_id);
        self
    }

    /// Drill filter first, then lower bound, then the optional upper bound.
    pub fn matches(&self, session: &SessionInput) -> bool {
        if self.drill_id.is_some_and(|id| id != session.drill_id) {
            return false;
        }
        if session.time_started < self.start {
            return false;
        }
        self.end.is_none_or(|end| session.time_started <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillStat {
    pub drill_name: String,
    pub total_time_millis: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillStatsReport {
    pub total_all_drills: i64,
    /// Descending by time; ties keep first-seen order.
    pub per_drill: Vec<DrillStat>,
}

/// Group the sessions `query` matches by drill name and total their time.
///
/// Sessions are visited in the order given, which decides tie order.
pub fn aggregate_sessions<'a, I>(sessions: I, query: &StatsQuery) -> DrillStatsReport
where
    I: IntoIterator<Item = &'a SessionInput>,
{
    let mut per_drill: Vec<DrillStat> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for session in sessions.into_iter().filter(|s| query.matches(s)) {
        match positions.get(session.drill_name.as_str()) {
            Some(&pos) => per_drill[pos].total_time_millis += session.total_session_time_millis,
            None => {
                positions.insert(session.drill_name.as_str(), per_drill.len());
                per_drill.push(DrillStat {
                    drill_name: session.drill_name.clone(),
                    total_time_millis: session.total_session_time_millis,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal totals.
    per_drill.sort_by(|a, b| b.total_time_millis.cmp(&a.total_time_millis));
    let total_all_drills = per_drill.iter().map(|s| s.total_time_millis).sum();

    DrillStatsReport {
        total_all_drills,
        per_drill,
    }
}
