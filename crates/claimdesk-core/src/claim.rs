//! The caller-owned claim record.
//!
//! A claim holds two independent optional participant slots plus the event
//! details entered alongside them. Edits arrive as [`Action`]s; participant
//! edits are routed through a [`ParticipantsSection`] bound to this claim and
//! the emitted replacement is merged back into the matching slot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  Result,
  action::{Action, DetailAction, ParticipantAction, Target},
  dates,
  editor::{Edit, Rejection, Role},
  id::{IdSource, RecordId},
  participant::ParticipantRecord,
  section::ParticipantsSection,
  services::{ServiceDetails, ServiceSet},
};

// ─── Kinds and status ────────────────────────────────────────────────────────

/// The claim form variant.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClaimKind {
  /// Vehicle and communication claims.
  Communication,
  Property,
  Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
  #[default]
  Draft,
  Submitted,
}

/// A free-text note attached to the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub note_id:     RecordId,
  pub text:        String,
  pub recorded_at: DateTime<Utc>,
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Whether an action changed the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
  Applied,
  Rejected(Rejection),
}

impl Outcome {
  pub fn is_applied(&self) -> bool { matches!(self, Self::Applied) }
}

// ─── ClaimRecord ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
  pub claim_id:        Uuid,
  pub kind:            ClaimKind,
  #[serde(default)]
  pub status:          ClaimStatus,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
  pub event_date:      Option<NaiveDate>,
  #[serde(default)]
  pub description:     String,
  #[serde(default)]
  pub notes:           Vec<Note>,
  #[serde(default)]
  pub services:        ServiceSet,
  #[serde(default)]
  pub service_details: ServiceDetails,
  pub injured_party:   Option<ParticipantRecord>,
  pub perpetrator:     Option<ParticipantRecord>,
}

impl ClaimRecord {
  /// A blank draft claim with both slots empty.
  pub fn new(kind: ClaimKind) -> Self {
    let now = Utc::now();
    Self {
      claim_id: Uuid::new_v4(),
      kind,
      status: ClaimStatus::Draft,
      created_at: now,
      updated_at: now,
      event_date: None,
      description: String::new(),
      notes: Vec::new(),
      services: ServiceSet::new(),
      service_details: ServiceDetails::default(),
      injured_party: None,
      perpetrator: None,
    }
  }

  pub fn is_editable(&self) -> bool { self.status == ClaimStatus::Draft }

  pub fn slot(&self, role: Role) -> Option<&ParticipantRecord> {
    match role {
      Role::InjuredParty => self.injured_party.as_ref(),
      Role::Perpetrator => self.perpetrator.as_ref(),
    }
  }

  /// Store `value` as the new authoritative value of the slot.
  pub fn set_slot(&mut self, role: Role, value: Option<ParticipantRecord>) {
    match role {
      Role::InjuredParty => self.injured_party = value,
      Role::Perpetrator => self.perpetrator = value,
    }
  }

  /// Apply one action, merging any replacement into this claim.
  ///
  /// Guard failures come back as [`Outcome::Rejected`] with the claim
  /// untouched. Only input that cannot be interpreted (an unparseable date)
  /// is an error.
  pub fn apply(
    &mut self,
    action: Action,
    ids: &mut impl IdSource,
  ) -> Result<Outcome> {
    let op = action.name();
    let role = action.role();
    let outcome = match action.split() {
      Target::Participants(action) => self.edit_participants(action, ids),
      Target::Details(action) => self.edit_details(action, ids)?,
    };

    match &outcome {
      Outcome::Applied => {
        self.updated_at = Utc::now();
        tracing::debug!(
          claim_id = %self.claim_id, op, ?role, "action applied"
        );
      }
      Outcome::Rejected(reason) => {
        tracing::debug!(
          claim_id = %self.claim_id, op, ?role, %reason, "action rejected"
        );
      }
    }
    Ok(outcome)
  }

  /// Lock the claim against further edits.
  pub fn submit(&mut self) -> Outcome {
    if !self.is_editable() {
      return Outcome::Rejected(Rejection::Disabled);
    }
    self.status = ClaimStatus::Submitted;
    self.updated_at = Utc::now();
    tracing::info!(
      claim_id = %self.claim_id,
      kind = %self.kind,
      "claim submitted"
    );
    Outcome::Applied
  }

  /// Route a participant action through a section bound to this claim.
  fn edit_participants(
    &mut self,
    action: ParticipantAction,
    ids: &mut impl IdSource,
  ) -> Outcome {
    let mut emitted = None;
    let edit = ParticipantsSection::new(
      self.injured_party.as_ref(),
      self.perpetrator.as_ref(),
      |role, value| emitted = Some((role, value)),
    )
    .disabled(!self.is_editable())
    .dispatch(action, ids);

    if let Some((role, value)) = emitted {
      self.set_slot(role, value);
    }
    match edit {
      Edit::Applied(_) => Outcome::Applied,
      Edit::Rejected(reason) => Outcome::Rejected(reason),
    }
  }

  fn edit_details(
    &mut self,
    action: DetailAction,
    ids: &mut impl IdSource,
  ) -> Result<Outcome> {
    if !self.is_editable() {
      return Ok(Outcome::Rejected(Rejection::Disabled));
    }
    match action {
      DetailAction::SetService { service, called } => {
        self.services = self.services.with(service, called);
      }
      DetailAction::SetServiceDetail { field, value } => {
        if !self.services.visible(field) {
          return Ok(Outcome::Rejected(Rejection::ServiceNotCalled));
        }
        self.service_details = self.service_details.with(field, value);
      }
      DetailAction::SetEventDate { date } => {
        self.event_date = dates::parse_form_date(&date)?;
      }
      DetailAction::SetDescription { value } => self.description = value,
      DetailAction::AddNote { text } => self.notes.push(Note {
        note_id: ids.next_id(),
        text,
        recorded_at: Utc::now(),
      }),
    }
    Ok(Outcome::Applied)
  }
}
