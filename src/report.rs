//! Renders search outcomes for people and scripts.

use std::time::Duration;

use human_duration::human_duration;
use thousands::Separable;

use crate::search::SearchResult;
use crate::space::Cost;
use crate::space::State;

/// Marker printed instead of a goal when none was reached.
pub const NO_GOAL: &str = "NoGoalFound";
/// Marker printed instead of a path when none was found.
pub const NO_PATH: &str = "NoPath";

/// The two-line answer to a search.
///
/// ```text
/// <goal> <expanded>
/// <path>
/// ```
///
/// or `NoGoalFound <expanded>` followed by `NoPath` when nothing was reached.
#[derive(Debug)]
pub struct Report<'r, St, C>
where
    St: State,
    C: Cost,
{
    result: &'r SearchResult<St, C>,
}

impl<'r, St, C> Report<'r, St, C>
where
    St: State,
    C: Cost,
{
    pub fn new(result: &'r SearchResult<St, C>) -> Self {
        Self { result }
    }

    /// Path cost, length, and timing details.
    pub fn write_stats<W: std::io::Write>(
        &self,
        mut out: W,
        elapsed: Duration,
    ) -> std::io::Result<()> {
        let r = self.result;
        writeln!(out, "Search Stats:")?;
        if r.is_success() {
            writeln!(out, "  - Path cost:  {}", r.path.cost)?;
            writeln!(out, "  - Path edges: {}", r.path.len().separate_with_commas())?;
        }
        writeln!(out, "  - Expanded:   {}", r.expanded.separate_with_commas())?;
        writeln!(out, "  - Elapsed:    {}", human_duration(&elapsed))?;
        Ok(())
    }
}

impl<St, C> std::fmt::Display for Report<'_, St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let r = self.result;
        match &r.goal {
            Some(goal) => {
                writeln!(f, "{goal} {}", r.expanded)?;
                write!(f, "{}", r.path)
            }
            None => {
                writeln!(f, "{NO_GOAL} {}", r.expanded)?;
                write!(f, "{NO_PATH}")
            }
        }
    }
}
