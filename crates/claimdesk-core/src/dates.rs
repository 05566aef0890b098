//! Date-string reformatting between form input and display forms.
//!
//! Form inputs carry ISO dates (`2024-03-05`); summaries display the local
//! form (`05.03.2024`). Both are accepted on input.

use chrono::NaiveDate;

use crate::{Error, Result};

const INPUT_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Parse a date typed into a form. An empty (or blank) string clears the date.
pub fn parse_form_date(input: &str) -> Result<Option<NaiveDate>> {
  let input = input.trim();
  if input.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(input, INPUT_FORMAT)
    .or_else(|_| NaiveDate::parse_from_str(input, DISPLAY_FORMAT))
    .map(Some)
    .map_err(|_| Error::InvalidDate(input.to_owned()))
}

/// `DD.MM.YYYY`, as shown on summary views.
pub fn display_date(date: NaiveDate) -> String {
  date.format(DISPLAY_FORMAT).to_string()
}

/// `YYYY-MM-DD`, as expected by date inputs.
pub fn input_date(date: NaiveDate) -> String {
  date.format(INPUT_FORMAT).to_string()
}

/// Reformat any accepted date string into display form.
pub fn reformat_for_display(input: &str) -> Result<String> {
  Ok(parse_form_date(input)?.map(display_date).unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_both_forms() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
    assert_eq!(parse_form_date("2024-03-05").unwrap(), expected);
    assert_eq!(parse_form_date("05.03.2024").unwrap(), expected);
  }

  #[test]
  fn blank_input_clears() {
    assert_eq!(parse_form_date("   ").unwrap(), None);
    assert_eq!(reformat_for_display("").unwrap(), "");
  }

  #[test]
  fn rejects_garbage() {
    assert!(matches!(
      parse_form_date("03/05/2024"),
      Err(Error::InvalidDate(s)) if s == "03/05/2024"
    ));
    assert!(parse_form_date("2024-02-30").is_err());
  }

  #[test]
  fn reformats_iso_to_display() {
    assert_eq!(reformat_for_display("2023-12-01").unwrap(), "01.12.2023");
    let date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
    assert_eq!(input_date(date), "2023-12-01");
  }
}
