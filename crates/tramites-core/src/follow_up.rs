//! Follow-ups (seguimientos) — dated notes attached to a case over time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CaseId, FollowUpId};

/// A persisted follow-up. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
  pub id:             FollowUpId,
  pub case_id:        CaseId,
  pub follow_up_date: NaiveDate,
  pub annotation:     String,
  /// Store-assigned creation timestamp. Informational; ids give the order.
  pub recorded_at:    DateTime<Utc>,
}

/// Input to [`crate::store::RecordStore::insert_follow_up`].
/// `recorded_at` is always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFollowUp {
  pub case_id:        CaseId,
  pub follow_up_date: NaiveDate,
  pub annotation:     String,
}

/// Sort follow-ups into display order, oldest first. Ids are assigned
/// monotonically by the store, so they follow insertion even when the wall
/// clock does not.
pub fn sort_for_display(follow_ups: &mut [FollowUp]) {
  follow_ups.sort_by_key(|f| f.id);
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn follow_up(id: i64, hour: u32) -> FollowUp {
    FollowUp {
      id:             FollowUpId(id),
      case_id:        CaseId(1),
      follow_up_date: NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(),
      annotation:     format!("#{id}"),
      recorded_at:    Utc.with_ymd_and_hms(2024, 5, 7, hour, 0, 0).unwrap(),
    }
  }

  #[test]
  fn display_order_follows_ids_when_the_clock_steps_back() {
    let mut listed = vec![follow_up(12, 8), follow_up(10, 10), follow_up(11, 9)];
    sort_for_display(&mut listed);
    let ids: Vec<_> = listed.iter().map(|f| f.id.0).collect();
    assert_eq!(ids, [10, 11, 12]);
  }
}
