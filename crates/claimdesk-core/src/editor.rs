//! Pure slot transformations.
//!
//! Each function takes the current value of one participant slot and returns
//! an [`Edit`]: either the complete replacement value for the slot or the
//! reason the edit was refused. Nothing is mutated in place; the caller stores
//! the replacement as the new slot value.
//!
//! Slot lifecycle:
//!
//! | From    | Operation                  | To                  |
//! |---------|----------------------------|---------------------|
//! | Absent  | [`add_participant`]        | Present (1 driver)  |
//! | Present | [`remove_participant`]     | Absent              |
//! | Present | field / driver operations  | Present             |
//! | Absent  | field / driver operations  | rejected, Absent    |

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
  id::IdSource,
  participant::{DriverField, DriverRecord, ParticipantField, ParticipantRecord},
};

// ─── Roles ───────────────────────────────────────────────────────────────────

/// One of the two fixed participant slots of a claim.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
  InjuredParty,
  Perpetrator,
}

// ─── Outcome types ───────────────────────────────────────────────────────────

/// Why an edit left the slot unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
  #[error("slot is empty")]
  SlotAbsent,

  #[error("slot is already occupied")]
  SlotOccupied,

  #[error("index {index} out of range for {len} drivers")]
  IndexOutOfRange { index: usize, len: usize },

  #[error("a participant must keep at least one driver")]
  LastDriverInvariant,

  #[error("editing is disabled")]
  Disabled,

  #[error("service is not called")]
  ServiceNotCalled,
}

/// The result of one slot edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
  /// The new value for the slot.
  Applied(Option<ParticipantRecord>),
  Rejected(Rejection),
}

impl Edit {
  pub fn is_applied(&self) -> bool { matches!(self, Self::Applied(_)) }

  pub fn rejection(&self) -> Option<&Rejection> {
    match self {
      Self::Rejected(reason) => Some(reason),
      Self::Applied(_) => None,
    }
  }

  /// The slot value after this edit: the replacement if applied, otherwise
  /// `current` unchanged.
  pub fn resolve(
    self,
    current: Option<ParticipantRecord>,
  ) -> Option<ParticipantRecord> {
    match self {
      Self::Applied(next) => next,
      Self::Rejected(_) => current,
    }
  }
}

fn reject(op: &'static str, reason: Rejection) -> Edit {
  tracing::debug!(op, %reason, "slot edit rejected");
  Edit::Rejected(reason)
}

// ─── Slot presence ───────────────────────────────────────────────────────────

/// Fill an empty slot with a blank participant seeded with one driver.
pub fn add_participant(
  current: Option<&ParticipantRecord>,
  ids: &mut impl IdSource,
) -> Edit {
  if current.is_some() {
    return reject("add_participant", Rejection::SlotOccupied);
  }
  let participant_id = ids.next_id();
  let driver = DriverRecord::new(ids.next_id());
  Edit::Applied(Some(ParticipantRecord::new(participant_id, driver)))
}

/// Clear the slot. Clearing an empty slot re-emits the empty value.
pub fn remove_participant(_current: Option<&ParticipantRecord>) -> Edit {
  Edit::Applied(None)
}

// ─── Participant fields ──────────────────────────────────────────────────────

/// Replace a single field of a present participant.
pub fn update_field(
  current: Option<&ParticipantRecord>,
  field: ParticipantField,
  value: impl Into<String>,
) -> Edit {
  match current {
    Some(participant) => {
      Edit::Applied(Some(participant.with_field(field, value)))
    }
    None => reject("update_field", Rejection::SlotAbsent),
  }
}

// ─── Driver sequence ─────────────────────────────────────────────────────────

/// Replace a single field of the driver at `index`.
pub fn update_driver(
  current: Option<&ParticipantRecord>,
  index: usize,
  field: DriverField,
  value: impl Into<String>,
) -> Edit {
  let Some(participant) = current else {
    return reject("update_driver", Rejection::SlotAbsent);
  };
  let Some(driver) = participant.drivers.get(index) else {
    return reject("update_driver", out_of_range(participant, index));
  };

  let replacement = driver.with_field(field, value);
  let drivers = participant
    .drivers
    .iter()
    .enumerate()
    .map(|(i, d)| if i == index { replacement.clone() } else { d.clone() })
    .collect();
  Edit::Applied(Some(participant.with_drivers(drivers)))
}

/// Append a blank driver to the end of the sequence.
pub fn add_driver(
  current: Option<&ParticipantRecord>,
  ids: &mut impl IdSource,
) -> Edit {
  let Some(participant) = current else {
    return reject("add_driver", Rejection::SlotAbsent);
  };
  let mut drivers = participant.drivers.clone();
  drivers.push(DriverRecord::new(ids.next_id()));
  Edit::Applied(Some(participant.with_drivers(drivers)))
}

/// Remove the driver at `index`, keeping the others in order.
///
/// Refused when it would leave the participant without drivers.
pub fn remove_driver(
  current: Option<&ParticipantRecord>,
  index: usize,
) -> Edit {
  let Some(participant) = current else {
    return reject("remove_driver", Rejection::SlotAbsent);
  };
  if index >= participant.drivers.len() {
    return reject("remove_driver", out_of_range(participant, index));
  }
  if participant.drivers.len() == 1 {
    return reject("remove_driver", Rejection::LastDriverInvariant);
  }

  let drivers = participant
    .drivers
    .iter()
    .enumerate()
    .filter(|(i, _)| *i != index)
    .map(|(_, d)| d.clone())
    .collect();
  Edit::Applied(Some(participant.with_drivers(drivers)))
}

fn out_of_range(participant: &ParticipantRecord, index: usize) -> Rejection {
  Rejection::IndexOutOfRange {
    index,
    len: participant.drivers.len(),
  }
}
