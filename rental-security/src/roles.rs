/// Roles that have a home page after login.
///
/// Variants are declared in routing priority order, so the smallest role a
/// principal holds decides where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Manager,
    Admin,
}

impl Role {
    /// Conventional prefix on granted-authority strings (`ROLE_USER`).
    pub const AUTHORITY_PREFIX: &'static str = "ROLE_";

    /// Parse a role label, with or without the `ROLE_` prefix. Matching is
    /// case-sensitive; unknown labels yield `None`.
    pub fn from_authority(authority: &str) -> Option<Role> {
        let label = authority
            .strip_prefix(Self::AUTHORITY_PREFIX)
            .unwrap_or(authority);
        match label {
            "USER" => Some(Role::User),
            "MANAGER" => Some(Role::Manager),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }

    /// Where this role lands after login.
    ///
    /// The user home is absolute while the other two are relative to the
    /// current path. Kept as found; see DESIGN.md before "fixing" it.
    pub fn home(self) -> &'static str {
        match self {
            Role::User => "/userHome",
            Role::Manager => "managerHome",
            Role::Admin => "adminHome",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
