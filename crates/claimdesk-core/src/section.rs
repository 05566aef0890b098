//! The participants section: binds the two slot values supplied by the
//! owning screen to a single replacement callback.
//!
//! The section never stores the values it emits. After each applied edit the
//! owner stores the replacement and builds a fresh section from its updated
//! claim, the same way a form re-renders from its parent's state.

use crate::{
  action::ParticipantAction,
  editor::{self, Edit, Rejection, Role},
  id::IdSource,
  participant::{DriverField, ParticipantField, ParticipantRecord},
};

pub struct ParticipantsSection<'a, F>
where
  F: FnMut(Role, Option<ParticipantRecord>),
{
  injured_party: Option<&'a ParticipantRecord>,
  perpetrator:   Option<&'a ParticipantRecord>,
  disabled:      bool,
  on_change:     F,
}

impl<'a, F> ParticipantsSection<'a, F>
where
  F: FnMut(Role, Option<ParticipantRecord>),
{
  pub fn new(
    injured_party: Option<&'a ParticipantRecord>,
    perpetrator: Option<&'a ParticipantRecord>,
    on_change: F,
  ) -> Self {
    Self {
      injured_party,
      perpetrator,
      disabled: false,
      on_change,
    }
  }

  /// When set, every operation is refused without invoking the callback.
  pub fn disabled(mut self, disabled: bool) -> Self {
    self.disabled = disabled;
    self
  }

  pub fn slot(&self, role: Role) -> Option<&'a ParticipantRecord> {
    match role {
      Role::InjuredParty => self.injured_party,
      Role::Perpetrator => self.perpetrator,
    }
  }

  // ── Slot presence ─────────────────────────────────────────────────────────

  pub fn add_injured_party(&mut self, ids: &mut impl IdSource) -> Edit {
    self.add(Role::InjuredParty, ids)
  }

  pub fn add_perpetrator(&mut self, ids: &mut impl IdSource) -> Edit {
    self.add(Role::Perpetrator, ids)
  }

  pub fn remove_injured_party(&mut self) -> Edit {
    self.remove(Role::InjuredParty)
  }

  pub fn remove_perpetrator(&mut self) -> Edit {
    self.remove(Role::Perpetrator)
  }

  pub fn add(&mut self, role: Role, ids: &mut impl IdSource) -> Edit {
    self.run(role, |current| editor::add_participant(current, ids))
  }

  pub fn remove(&mut self, role: Role) -> Edit {
    self.run(role, editor::remove_participant)
  }

  // ── Field and driver edits ────────────────────────────────────────────────

  pub fn update_field(
    &mut self,
    role: Role,
    field: ParticipantField,
    value: impl Into<String>,
  ) -> Edit {
    self.run(role, |current| editor::update_field(current, field, value))
  }

  pub fn update_driver(
    &mut self,
    role: Role,
    index: usize,
    field: DriverField,
    value: impl Into<String>,
  ) -> Edit {
    self.run(role, |current| {
      editor::update_driver(current, index, field, value)
    })
  }

  pub fn add_driver(&mut self, role: Role, ids: &mut impl IdSource) -> Edit {
    self.run(role, |current| editor::add_driver(current, ids))
  }

  pub fn remove_driver(&mut self, role: Role, index: usize) -> Edit {
    self.run(role, |current| editor::remove_driver(current, index))
  }

  // ── Dispatch ──────────────────────────────────────────────────────────────

  /// Run a participant action through the matching slot operation.
  pub fn dispatch(
    &mut self,
    action: ParticipantAction,
    ids: &mut impl IdSource,
  ) -> Edit {
    match action {
      ParticipantAction::Add { role } => self.add(role, ids),
      ParticipantAction::Remove { role } => self.remove(role),
      ParticipantAction::UpdateField { role, field, value } => {
        self.update_field(role, field, value)
      }
      ParticipantAction::AddDriver { role } => self.add_driver(role, ids),
      ParticipantAction::UpdateDriver {
        role,
        index,
        field,
        value,
      } => self.update_driver(role, index, field, value),
      ParticipantAction::RemoveDriver { role, index } => {
        self.remove_driver(role, index)
      }
    }
  }

  fn run(
    &mut self,
    role: Role,
    op: impl FnOnce(Option<&ParticipantRecord>) -> Edit,
  ) -> Edit {
    if self.disabled {
      tracing::debug!(%role, "participants section is disabled");
      return Edit::Rejected(Rejection::Disabled);
    }
    let edit = op(self.slot(role));
    if let Edit::Applied(next) = &edit {
      (self.on_change)(role, next.clone());
    }
    edit
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::id::SequentialIds;

  type Emitted = Vec<(Role, Option<ParticipantRecord>)>;

  #[test]
  fn applied_edit_notifies_exactly_once() {
    let mut ids = SequentialIds::default();
    let mut emitted: Emitted = Vec::new();
    let edit = ParticipantsSection::new(None, None, |role, value| {
      emitted.push((role, value))
    })
    .add_perpetrator(&mut ids);

    assert!(edit.is_applied());
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, Role::Perpetrator);
    assert!(emitted[0].1.is_some());
  }

  #[test]
  fn rejected_edit_does_not_notify() {
    let mut emitted: Emitted = Vec::new();
    let edit = ParticipantsSection::new(None, None, |role, value| {
      emitted.push((role, value))
    })
    .update_field(Role::InjuredParty, ParticipantField::Name, "X");

    assert_eq!(edit, Edit::Rejected(Rejection::SlotAbsent));
    assert!(emitted.is_empty());
  }

  #[test]
  fn disabled_section_refuses_everything() {
    let mut ids = SequentialIds::default();
    let mut calls = 0;
    let mut section =
      ParticipantsSection::new(None, None, |_, _| calls += 1).disabled(true);

    assert_eq!(
      section.add_injured_party(&mut ids),
      Edit::Rejected(Rejection::Disabled)
    );
    assert_eq!(
      section.remove_perpetrator(),
      Edit::Rejected(Rejection::Disabled)
    );
    assert_eq!(
      section.update_field(Role::InjuredParty, ParticipantField::Name, "X"),
      Edit::Rejected(Rejection::Disabled)
    );
    assert_eq!(
      section.update_driver(Role::Perpetrator, 0, DriverField::FirstName, "Y"),
      Edit::Rejected(Rejection::Disabled)
    );
    assert_eq!(
      section.add_driver(Role::InjuredParty, &mut ids),
      Edit::Rejected(Rejection::Disabled)
    );
    assert_eq!(
      section.remove_driver(Role::Perpetrator, 1),
      Edit::Rejected(Rejection::Disabled)
    );
    drop(section);
    assert_eq!(calls, 0);
  }

  #[test]
  fn dispatch_routes_to_the_named_slot() {
    let mut ids = SequentialIds::default();
    let mut emitted: Emitted = Vec::new();
    let mut section = ParticipantsSection::new(None, None, |r, v| {
      emitted.push((r, v))
    });
    let edit = section.dispatch(
      ParticipantAction::Add {
        role: Role::InjuredParty,
      },
      &mut ids,
    );
    assert!(edit.is_applied());
    assert_eq!(
      section.dispatch(
        ParticipantAction::RemoveDriver {
          role:  Role::Perpetrator,
          index: 0,
        },
        &mut ids,
      ),
      Edit::Rejected(Rejection::SlotAbsent)
    );
    drop(section);
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, Role::InjuredParty);
  }

  #[test]
  fn slots_are_independent() {
    let mut ids = SequentialIds::default();
    let injured = match editor::add_participant(None, &mut ids) {
      Edit::Applied(Some(p)) => p,
      other => panic!("unexpected {other:?}"),
    };
    let mut emitted: Emitted = Vec::new();
    let mut section = ParticipantsSection::new(Some(&injured), None, |r, v| {
      emitted.push((r, v))
    });

    assert!(section.add_perpetrator(&mut ids).is_applied());
    assert_eq!(
      section.add_injured_party(&mut ids),
      Edit::Rejected(Rejection::SlotOccupied)
    );
    drop(section);
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, Role::Perpetrator);
  }
}
