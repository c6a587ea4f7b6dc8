use std::fmt;
use uuid::Uuid;

/// Resource types subject to ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Listing,
    Booking,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Listing => write!(f, "listing"),
            ResourceKind::Booking => write!(f, "booking"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("{kind} is not owned by the requesting user")]
    NotOwner { kind: ResourceKind },
}

/// The single authorization rule of the platform: a mutating operation on a
/// listing or booking is allowed only for the identity recorded as its owner.
/// Must be evaluated before any state change.
pub fn require_owner(kind: ResourceKind, owner: Uuid, caller: Uuid) -> Result<(), PolicyError> {
    if owner == caller {
        Ok(())
    } else {
        tracing::debug!(%kind, %owner, %caller, "ownership check failed");
        Err(PolicyError::NotOwner { kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_passes() {
        let id = Uuid::new_v4();
        assert!(require_owner(ResourceKind::Listing, id, id).is_ok());
    }

    #[test]
    fn test_non_owner_rejected() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let err = require_owner(ResourceKind::Booking, owner, other).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::NotOwner {
                kind: ResourceKind::Booking
            }
        ));
    }
}
