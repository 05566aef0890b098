//! Participant and driver records.
//!
//! A participant is a person or entity involved in the claim event. It owns a
//! non-empty, ordered sequence of drivers. Records are values: every edit
//! produces a new record through [`ParticipantRecord::with_field`] or
//! [`DriverRecord::with_field`] and the old one is left untouched.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// Country code applied to freshly created participants.
pub const DEFAULT_COUNTRY: &str = "PL";

/// Role label applied to freshly created drivers.
pub const DEFAULT_DRIVER_ROLE: &str = "kierowca";

// ─── Field names ─────────────────────────────────────────────────────────────

/// Every editable scalar field of a [`ParticipantRecord`].
///
/// The id and the drivers sequence are intentionally not nameable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipantField {
  Name,
  Address,
  City,
  PostalCode,
  Country,
  Phone,
  Email,
  VehicleRegistration,
  VehicleVin,
  VehicleType,
  VehicleBrand,
  VehicleModel,
  InsuranceCompany,
  PolicyNumber,
}

/// Every editable field of a [`DriverRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriverField {
  Name,
  LicenseNumber,
  Role,
  FirstName,
  LastName,
  Phone,
  Email,
  Address,
  City,
  PostalCode,
  Country,
  PersonalId,
}

// ─── DriverRecord ────────────────────────────────────────────────────────────

/// One person operating the participant's vehicle or acting as a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRecord {
  pub id:             RecordId,
  pub name:           String,
  pub license_number: String,
  /// Free-text role label, e.g. "kierowca".
  pub role:           String,
  pub first_name:     String,
  pub last_name:      String,
  pub phone:          String,
  pub email:          String,
  pub address:        String,
  pub city:           String,
  pub postal_code:    String,
  pub country:        String,
  pub personal_id:    String,
}

impl DriverRecord {
  /// A blank driver with the default role.
  pub fn new(id: RecordId) -> Self {
    Self {
      id,
      name: String::new(),
      license_number: String::new(),
      role: DEFAULT_DRIVER_ROLE.to_owned(),
      first_name: String::new(),
      last_name: String::new(),
      phone: String::new(),
      email: String::new(),
      address: String::new(),
      city: String::new(),
      postal_code: String::new(),
      country: String::new(),
      personal_id: String::new(),
    }
  }

  /// A copy of this driver with one field replaced.
  pub fn with_field(
    &self,
    field: DriverField,
    value: impl Into<String>,
  ) -> Self {
    let mut next = self.clone();
    let value = value.into();
    match field {
      DriverField::Name => next.name = value,
      DriverField::LicenseNumber => next.license_number = value,
      DriverField::Role => next.role = value,
      DriverField::FirstName => next.first_name = value,
      DriverField::LastName => next.last_name = value,
      DriverField::Phone => next.phone = value,
      DriverField::Email => next.email = value,
      DriverField::Address => next.address = value,
      DriverField::City => next.city = value,
      DriverField::PostalCode => next.postal_code = value,
      DriverField::Country => next.country = value,
      DriverField::PersonalId => next.personal_id = value,
    }
    next
  }
}

// ─── ParticipantRecord ───────────────────────────────────────────────────────

/// An injured party or perpetrator, with identity, vehicle and insurance
/// details.
///
/// Invariant: `drivers` is never empty. Constructors seed one driver and the
/// editor refuses to remove the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
  pub id:                   RecordId,
  pub name:                 String,
  pub address:              String,
  pub city:                 String,
  pub postal_code:          String,
  pub country:              String,
  pub phone:                String,
  pub email:                String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub vehicle_registration: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub vehicle_vin:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub vehicle_type:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub vehicle_brand:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub vehicle_model:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub insurance_company:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub policy_number:        Option<String>,
  pub drivers:              Vec<DriverRecord>,
}

impl ParticipantRecord {
  /// A blank participant owning exactly `first_driver`.
  pub fn new(id: RecordId, first_driver: DriverRecord) -> Self {
    Self {
      id,
      name: String::new(),
      address: String::new(),
      city: String::new(),
      postal_code: String::new(),
      country: DEFAULT_COUNTRY.to_owned(),
      phone: String::new(),
      email: String::new(),
      vehicle_registration: None,
      vehicle_vin: None,
      vehicle_type: None,
      vehicle_brand: None,
      vehicle_model: None,
      insurance_company: None,
      policy_number: None,
      drivers: vec![first_driver],
    }
  }

  /// A copy of this participant with one field replaced.
  ///
  /// An empty string clears an optional field back to `None`.
  pub fn with_field(
    &self,
    field: ParticipantField,
    value: impl Into<String>,
  ) -> Self {
    let mut next = self.clone();
    let value = value.into();
    match field {
      ParticipantField::Name => next.name = value,
      ParticipantField::Address => next.address = value,
      ParticipantField::City => next.city = value,
      ParticipantField::PostalCode => next.postal_code = value,
      ParticipantField::Country => next.country = value,
      ParticipantField::Phone => next.phone = value,
      ParticipantField::Email => next.email = value,
      ParticipantField::VehicleRegistration => {
        next.vehicle_registration = optional(value)
      }
      ParticipantField::VehicleVin => next.vehicle_vin = optional(value),
      ParticipantField::VehicleType => next.vehicle_type = optional(value),
      ParticipantField::VehicleBrand => next.vehicle_brand = optional(value),
      ParticipantField::VehicleModel => next.vehicle_model = optional(value),
      ParticipantField::InsuranceCompany => {
        next.insurance_company = optional(value)
      }
      ParticipantField::PolicyNumber => next.policy_number = optional(value),
    }
    next
  }

  /// A copy of this participant carrying `drivers` instead.
  pub fn with_drivers(&self, drivers: Vec<DriverRecord>) -> Self {
    Self {
      drivers,
      ..self.clone()
    }
  }
}

fn optional(value: String) -> Option<String> {
  if value.is_empty() { None } else { Some(value) }
}
