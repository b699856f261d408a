//! Navigable routes and their role requirements.
//!
//! A route is either public (no declaration, the guard is bypassed) or
//! protected by a [`RoutePermission`] naming the roles allowed to view it.

use std::collections::BTreeSet;

use url::form_urlencoded;

use crate::{DomainError, DomainResult, Role};

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";

/// Path of the terminal "not allowed" view.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Query parameter carrying the path to return to after login.
pub const RETURN_TO_PARAM: &str = "returnTo";

/// Set of roles allowed to view a protected route. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePermission {
    allowed: BTreeSet<Role>,
}

impl RoutePermission {
    /// Creates a permission from the given roles.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyRoleSet`] if no role is given.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> DomainResult<Self> {
        let allowed: BTreeSet<Role> = roles.into_iter().collect();
        if allowed.is_empty() {
            return Err(DomainError::EmptyRoleSet);
        }
        Ok(Self { allowed })
    }

    /// Permission for a single role.
    #[must_use]
    pub fn only(role: Role) -> Self {
        Self {
            allowed: BTreeSet::from([role]),
        }
    }

    /// Permission for every authenticated user.
    #[must_use]
    pub fn any_user() -> Self {
        Self {
            allowed: BTreeSet::from([Role::User, Role::Admin]),
        }
    }

    /// Returns true if `role` may view the route.
    #[must_use]
    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Allowed roles in a stable order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.allowed.iter().copied()
    }
}

/// Access requirement of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone may view it; the guard is not consulted.
    Public,
    /// Only the listed roles may view it.
    Protected(RoutePermission),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
}

/// A route pattern such as `/bookings/:id` or `/admin/*`.
///
/// `:name` matches exactly one segment; a trailing `*` matches the route
/// itself and everything nested below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    nested: bool,
}

impl RoutePattern {
    /// Parses a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRoutePattern`] if the pattern does not
    /// start with `/` or uses `*` anywhere but the last segment.
    pub fn parse(pattern: &str) -> DomainResult<Self> {
        if !pattern.starts_with('/') {
            return Err(DomainError::InvalidRoutePattern(pattern.to_string()));
        }

        let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        let nested = parts.last() == Some(&"*");
        let body = if nested { &parts[..parts.len() - 1] } else { &parts[..] };

        let mut segments = Vec::with_capacity(body.len());
        for part in body {
            if part.contains('*') {
                return Err(DomainError::InvalidRoutePattern(pattern.to_string()));
            }
            segments.push(if part.starts_with(':') {
                Segment::Param
            } else {
                Segment::Literal((*part).to_string())
            });
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
            nested,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if the (normalized) path matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if parts.len() < self.segments.len() || (!self.nested && parts.len() != self.segments.len())
        {
            return false;
        }

        self.segments
            .iter()
            .zip(&parts)
            .all(|(segment, part)| match segment {
                Segment::Literal(literal) => literal == part,
                Segment::Param => true,
            })
    }
}

/// Ordered table of route declarations; the first matching rule wins and
/// unmatched paths are public.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<(RoutePattern, RouteAccess)>,
}

impl RouteTable {
    /// Creates an empty table (everything public).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a protected route.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or `roles` is empty.
    pub fn protect(
        mut self,
        pattern: &str,
        roles: impl IntoIterator<Item = Role>,
    ) -> DomainResult<Self> {
        let permission = RoutePermission::new(roles)?;
        self.rules
            .push((RoutePattern::parse(pattern)?, RouteAccess::Protected(permission)));
        Ok(self)
    }

    /// Adds an explicitly public route, shadowing broader protected rules
    /// declared after it.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid.
    pub fn public(mut self, pattern: &str) -> DomainResult<Self> {
        self.rules
            .push((RoutePattern::parse(pattern)?, RouteAccess::Public));
        Ok(self)
    }

    /// The guest-house application's routes.
    ///
    /// Admin pages live under `/admin`, the user area at the root. Guest
    /// house browsing and the account pages are public.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the patterns are static.
    pub fn standard() -> DomainResult<Self> {
        Self::new()
            .public("/guesthouses/*")?
            .public(LOGIN_PATH)?
            .public("/register")?
            .public("/forgot-password")?
            .public("/reset-password")?
            .public(UNAUTHORIZED_PATH)?
            .protect("/admin/*", [Role::Admin])?
            .protect("/", [Role::User, Role::Admin])?
            .protect("/my-bookings", [Role::User, Role::Admin])?
            .protect("/bookings/:id", [Role::User, Role::Admin])?
            .protect("/book", [Role::User, Role::Admin])
    }

    /// Access requirement for `path`.
    #[must_use]
    pub fn access_for(&self, path: &str) -> RouteAccess {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map_or(RouteAccess::Public, |(_, access)| access.clone())
    }
}

/// Strips query and fragment and any trailing slash; the root stays `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Returns true if `path` points at the login view.
#[must_use]
pub fn is_login_path(path: &str) -> bool {
    normalize_path(path) == LOGIN_PATH
}

/// Builds the login path, optionally remembering where to return.
#[must_use]
pub fn login_path(return_to: Option<&str>) -> String {
    match return_to.filter(|target| is_safe_return_target(target)) {
        Some(target) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair(RETURN_TO_PARAM, target)
                .finish();
            format!("{LOGIN_PATH}?{query}")
        }
        None => LOGIN_PATH.to_string(),
    }
}

/// Extracts the remembered return path from a login path.
///
/// Targets that are not same-site absolute paths are dropped.
#[must_use]
pub fn return_to(path: &str) -> Option<String> {
    let (_, query) = path.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == RETURN_TO_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|target| is_safe_return_target(target))
}

fn is_safe_return_target(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !is_login_path(target)
}
