//! Profile — display attributes, exactly one per account.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Gender ──────────────────────────────────────────────────────────────────

/// A gender category in its canonical uppercase form.
///
/// Callers submit any casing (`"f"`, `"F"`, `" f "`); construction trims and
/// uppercases, so a stored or served value is always canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Gender(String);

impl Gender {
  pub fn new(raw: &str) -> Self { Self(raw.trim().to_ascii_uppercase()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl<'de> Deserialize<'de> for Gender {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let raw = String::deserialize(deserializer)?;
    Ok(Self::new(&raw))
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// One-to-one with an account; created in the same atomic unit and never
/// created on its own. Only the rename operation mutates `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
  pub account_id: Uuid,
  pub name:       String,
  pub age:        u32,
  pub gender:     Gender,
  /// Reference to an externally hosted image, if any.
  pub image:      Option<String>,
}

/// Profile fields supplied at sign-up, before an account id exists.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileAttrs {
  pub name:   String,
  pub age:    u32,
  pub gender: Gender,
  pub image:  Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gender_uppercases_on_construction() {
    assert_eq!(Gender::new("f").as_str(), "F");
    assert_eq!(Gender::new("male").as_str(), "MALE");
    assert_eq!(Gender::new("F").as_str(), "F");
  }

  #[test]
  fn gender_trims_whitespace() {
    assert_eq!(Gender::new(" f ").as_str(), "F");
  }

  #[test]
  fn gender_canonicalises_through_deserialisation() {
    let g: Gender = serde_json::from_str("\"f\"").unwrap();
    assert_eq!(g.as_str(), "F");
  }
}
