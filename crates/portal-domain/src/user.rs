//! User domain types.

use serde::{Deserialize, Serialize};

/// Portal permission level assigned by the identity provider.
///
/// Wire format: `u8` (0 = Student, 1 = Admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student = 0,
    Admin = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Student),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Where a freshly signed-in user of this role lands.
    pub fn landing_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Student => "/home",
        }
    }
}
