//! The serialisable vocabulary of claim edits.
//!
//! An [`Action`] is what a screen sends when the user touches one input. It is
//! applied with [`ClaimRecord::apply`](crate::claim::ClaimRecord::apply),
//! which first [`split`](Action::split)s it into the part of the form it
//! targets.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
  editor::Role,
  participant::{DriverField, ParticipantField},
  services::{Service, ServiceDetailField},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "op", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
  // ── Participants ────────────────────────────────────────────────────────
  AddParticipant {
    role: Role,
  },
  RemoveParticipant {
    role: Role,
  },
  UpdateParticipant {
    role:  Role,
    field: ParticipantField,
    value: String,
  },

  // ── Drivers ─────────────────────────────────────────────────────────────
  AddDriver {
    role: Role,
  },
  UpdateDriver {
    role:  Role,
    index: usize,
    field: DriverField,
    value: String,
  },
  RemoveDriver {
    role:  Role,
    index: usize,
  },

  // ── Event details ───────────────────────────────────────────────────────
  SetService {
    service: Service,
    called:  bool,
  },
  SetServiceDetail {
    field: ServiceDetailField,
    value: String,
  },
  /// `YYYY-MM-DD` or `DD.MM.YYYY`; empty clears the date.
  SetEventDate {
    date: String,
  },
  SetDescription {
    value: String,
  },
  AddNote {
    text: String,
  },
}

impl Action {
  /// The snake_case operation name, matching the serialised `op` tag.
  pub fn name(&self) -> &'static str { self.into() }

  /// The participant slot this action targets, if any.
  pub fn role(&self) -> Option<Role> {
    match self {
      Self::AddParticipant { role }
      | Self::RemoveParticipant { role }
      | Self::UpdateParticipant { role, .. }
      | Self::AddDriver { role }
      | Self::UpdateDriver { role, .. }
      | Self::RemoveDriver { role, .. } => Some(*role),
      Self::SetService { .. }
      | Self::SetServiceDetail { .. }
      | Self::SetEventDate { .. }
      | Self::SetDescription { .. }
      | Self::AddNote { .. } => None,
    }
  }

  /// Separate slot edits from event-detail edits.
  pub fn split(self) -> Target {
    match self {
      Self::AddParticipant { role } => {
        Target::Participants(ParticipantAction::Add { role })
      }
      Self::RemoveParticipant { role } => {
        Target::Participants(ParticipantAction::Remove { role })
      }
      Self::UpdateParticipant { role, field, value } => {
        Target::Participants(ParticipantAction::UpdateField {
          role,
          field,
          value,
        })
      }
      Self::AddDriver { role } => {
        Target::Participants(ParticipantAction::AddDriver { role })
      }
      Self::UpdateDriver {
        role,
        index,
        field,
        value,
      } => Target::Participants(ParticipantAction::UpdateDriver {
        role,
        index,
        field,
        value,
      }),
      Self::RemoveDriver { role, index } => {
        Target::Participants(ParticipantAction::RemoveDriver { role, index })
      }
      Self::SetService { service, called } => {
        Target::Details(DetailAction::SetService { service, called })
      }
      Self::SetServiceDetail { field, value } => {
        Target::Details(DetailAction::SetServiceDetail { field, value })
      }
      Self::SetEventDate { date } => {
        Target::Details(DetailAction::SetEventDate { date })
      }
      Self::SetDescription { value } => {
        Target::Details(DetailAction::SetDescription { value })
      }
      Self::AddNote { text } => Target::Details(DetailAction::AddNote { text }),
    }
  }
}

// ─── Split forms ─────────────────────────────────────────────────────────────

/// The part of the claim an [`Action`] edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  Participants(ParticipantAction),
  Details(DetailAction),
}

/// An edit handled by the participants section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantAction {
  Add {
    role: Role,
  },
  Remove {
    role: Role,
  },
  UpdateField {
    role:  Role,
    field: ParticipantField,
    value: String,
  },
  AddDriver {
    role: Role,
  },
  UpdateDriver {
    role:  Role,
    index: usize,
    field: DriverField,
    value: String,
  },
  RemoveDriver {
    role:  Role,
    index: usize,
  },
}

/// An edit to the event details entered alongside the participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
  SetService {
    service: Service,
    called:  bool,
  },
  SetServiceDetail {
    field: ServiceDetailField,
    value: String,
  },
  SetEventDate {
    date: String,
  },
  SetDescription {
    value: String,
  },
  AddNote {
    text: String,
  },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialises_from_tagged_json() {
    let action: Action = serde_json::from_str(
      r#"{
        "op": "update_driver",
        "role": "perpetrator",
        "index": 1,
        "field": "lastName",
        "value": "Nowak"
      }"#,
    )
    .unwrap();
    assert_eq!(
      action,
      Action::UpdateDriver {
        role:  Role::Perpetrator,
        index: 1,
        field: DriverField::LastName,
        value: "Nowak".into(),
      }
    );
    assert_eq!(action.role(), Some(Role::Perpetrator));
  }

  #[test]
  fn name_matches_op_tag() {
    let action = Action::SetService {
      service: Service::TowTruck,
      called:  true,
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["op"], action.name());
    assert_eq!(action.role(), None);
  }

  #[test]
  fn split_routes_slot_edits_to_participants() {
    let action = Action::RemoveDriver {
      role:  Role::InjuredParty,
      index: 2,
    };
    assert_eq!(action.role(), Some(Role::InjuredParty));
    assert_eq!(
      action.split(),
      Target::Participants(ParticipantAction::RemoveDriver {
        role:  Role::InjuredParty,
        index: 2,
      })
    );
  }

  #[test]
  fn split_routes_event_edits_to_details() {
    let action = Action::AddNote {
      text: "photos follow".into(),
    };
    assert_eq!(action.role(), None);
    assert_eq!(
      action.split(),
      Target::Details(DetailAction::AddNote {
        text: "photos follow".into(),
      })
    );
  }

  #[test]
  fn unknown_field_is_rejected_at_parse_time() {
    let result = serde_json::from_str::<Action>(
      r#"{
        "op": "update_participant",
        "role": "injured_party",
        "field": "drivers",
        "value": ""
      }"#,
    );
    assert!(result.is_err());
  }
}
