//! Emergency services called to the scene, and the detail inputs that only
//! apply when a given service was called.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _};

/// A service that may have been called to the event.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Service {
  Police,
  Ambulance,
  FireBrigade,
  TowTruck,
}

/// A detail input shown only when its service was called.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceDetailField {
  PoliceUnit,
  PoliceReportNumber,
  AmbulanceUnit,
  FireBrigadeUnit,
  TowCompany,
  TowDestination,
}

impl ServiceDetailField {
  pub fn required_service(self) -> Service {
    match self {
      Self::PoliceUnit | Self::PoliceReportNumber => Service::Police,
      Self::AmbulanceUnit => Service::Ambulance,
      Self::FireBrigadeUnit => Service::FireBrigade,
      Self::TowCompany | Self::TowDestination => Service::TowTruck,
    }
  }
}

/// The set of services called to the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceSet(BTreeSet<Service>);

impl ServiceSet {
  pub fn new() -> Self { Self::default() }

  pub fn contains(&self, service: Service) -> bool { self.0.contains(&service) }

  /// A copy of this set with `service` present or absent.
  pub fn with(&self, service: Service, called: bool) -> Self {
    let mut next = self.clone();
    if called {
      next.0.insert(service);
    } else {
      next.0.remove(&service);
    }
    next
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Whether `field` should be shown for this set.
  pub fn visible(&self, field: ServiceDetailField) -> bool {
    self.contains(field.required_service())
  }

  /// Every detail field currently shown, in declaration order.
  pub fn visible_fields(&self) -> Vec<ServiceDetailField> {
    ServiceDetailField::iter()
      .filter(|f| self.visible(*f))
      .collect()
  }
}

impl FromIterator<Service> for ServiceSet {
  fn from_iter<I: IntoIterator<Item = Service>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Values entered into service detail inputs.
///
/// Values survive a service being unchecked; they are only hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceDetails(BTreeMap<ServiceDetailField, String>);

impl ServiceDetails {
  pub fn get(&self, field: ServiceDetailField) -> Option<&str> {
    self.0.get(&field).map(String::as_str)
  }

  /// A copy with `field` set; an empty value removes the entry.
  pub fn with(
    &self,
    field: ServiceDetailField,
    value: impl Into<String>,
  ) -> Self {
    let mut next = self.clone();
    let value = value.into();
    if value.is_empty() {
      next.0.remove(&field);
    } else {
      next.0.insert(field, value);
    }
    next
  }

  /// Entries whose service is in `services`.
  pub fn visible<'a>(
    &'a self,
    services: &'a ServiceSet,
  ) -> impl Iterator<Item = (ServiceDetailField, &'a str)> + 'a {
    self
      .0
      .iter()
      .filter(|(field, _)| services.visible(**field))
      .map(|(field, value)| (*field, value.as_str()))
  }
}
