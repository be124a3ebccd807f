//! Weekly schedule.
//!
//! Seven fixed slots, one per day, each either unassigned or holding a plan
//! index. Slots are never created or destroyed; they only move between:
//!
//! ```text
//! Unassigned --update(plan)--> Assigned(plan) --update(other)--> Assigned(other)
//!      ^                             |
//!      +-------- clear / clearall ---+
//! ```

use crate::indexed::reindex_after_removal;
use crate::plan::PlanList;
use crate::types::{Day, DAYS_IN_WEEK};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayList {
    slots: [Option<usize>; DAYS_IN_WEEK],
}

impl DayList {
    /// All seven days unassigned
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a plan to a day (1 = Monday); any previous assignment is replaced
    pub fn update(&mut self, day_number: usize, plan_index: usize, plans: &PlanList) -> Result<Day> {
        let day = Day::from_number(day_number)?;
        plans.get(plan_index)?;

        self.slots[day as usize] = Some(plan_index);
        tracing::debug!("Scheduled plan {} on {}", plan_index, day);
        Ok(day)
    }

    /// Unassign a day; clearing an unassigned day is a no-op
    pub fn clear(&mut self, day_number: usize) -> Result<Day> {
        let day = Day::from_number(day_number)?;
        self.slots[day as usize] = None;
        tracing::debug!("Cleared {}", day);
        Ok(day)
    }

    pub fn clear_all(&mut self) {
        self.slots = [None; DAYS_IN_WEEK];
        tracing::debug!("Cleared all days");
    }

    pub fn plan_on(&self, day: Day) -> Option<usize> {
        self.slots[day as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Every day in order with its plan index, if any
    pub fn days(&self) -> impl Iterator<Item = (Day, Option<usize>)> + '_ {
        Day::ALL.into_iter().map(move |day| (day, self.plan_on(day)))
    }

    /// Every day in order with the name of its plan, if any
    pub fn list<'a>(&self, plans: &'a PlanList) -> Vec<(Day, Option<&'a str>)> {
        self.days()
            .map(|(day, plan)| {
                let name = plan
                    .and_then(|index| plans.get(index).ok())
                    .map(|p| p.name.as_str());
                (day, name)
            })
            .collect()
    }

    /// First day scheduled with the given plan
    pub fn first_using_plan(&self, plan_index: usize) -> Option<Day> {
        self.days()
            .find(|(_, plan)| *plan == Some(plan_index))
            .map(|(day, _)| day)
    }

    /// Follow the plan list after `removed` was deleted from it
    pub(crate) fn reindex_plans(&mut self, removed: usize) {
        for plan in self.slots.iter_mut().flatten() {
            reindex_after_removal(plan, removed);
        }
    }
}
