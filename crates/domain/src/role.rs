use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use staffdesk_core::{ActorIdentity, AppError, AppResult, NonEmptyString};

use crate::permission::PermissionSet;

/// Origin of a role; only custom roles can be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleType {
    /// Seeded built-in persona.
    System,
    /// Role created by an administrator.
    Custom,
}

impl RoleType {
    /// Returns the stable transport value for this role type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Custom => "Custom",
        }
    }
}

/// Coarse approval ranking consumed by approval workflows, from 0 to 5.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ApprovalAuthorityLevel(u8);

impl ApprovalAuthorityLevel {
    /// Highest accepted level.
    pub const MAX: u8 = 5;

    /// Creates a validated approval authority level.
    pub fn new(value: u8) -> AppResult<Self> {
        if value > Self::MAX {
            return Err(AppError::Validation(format!(
                "approval authority level must be between 0 and {}, got {value}",
                Self::MAX
            )));
        }

        Ok(Self(value))
    }

    /// Returns the numeric level.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ApprovalAuthorityLevel {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApprovalAuthorityLevel> for u8 {
    fn from(value: ApprovalAuthorityLevel) -> Self {
        value.0
    }
}

/// Change category recorded in role history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleHistoryAction {
    /// Role was created.
    Created,
    /// Descriptive fields or approval level changed.
    Updated,
    /// Permission matrix was replaced.
    #[serde(rename = "Permission Change")]
    PermissionChange,
}

impl RoleHistoryAction {
    /// Returns the stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::PermissionChange => "Permission Change",
        }
    }
}

/// One audit entry of a role's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleHistoryEntry {
    /// Change category.
    pub action: RoleHistoryAction,
    /// Human-readable summary.
    pub details: String,
    /// Time the change was applied.
    pub timestamp: DateTime<Utc>,
    /// Display name of the acting user.
    pub actor: String,
}

/// Validated input for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    /// Unique role name.
    pub name: NonEmptyString,
    /// Free-text description.
    pub description: String,
    /// Role origin.
    pub role_type: RoleType,
    /// Permission matrix.
    pub permissions: PermissionSet,
    /// Approval ranking.
    pub approval_authority_level: ApprovalAuthorityLevel,
}

/// Partial update of a role's mutable descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleUpdate {
    /// New name.
    pub name: Option<NonEmptyString>,
    /// New description.
    pub description: Option<String>,
    /// New approval ranking.
    pub approval_authority_level: Option<ApprovalAuthorityLevel>,
}

impl RoleUpdate {
    /// Returns whether the update sets no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.approval_authority_level.is_none()
    }
}

/// Named bundle of module permissions with an append-only history.
///
/// History is kept newest first. Subjects holding the role are not stored here;
/// they are derived from assignments by the owning registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: String,
    name: NonEmptyString,
    description: String,
    role_type: RoleType,
    permissions: PermissionSet,
    approval_authority_level: ApprovalAuthorityLevel,
    history: Vec<RoleHistoryEntry>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a role and seeds its history with a `Created` entry.
    #[must_use]
    pub fn create(id: String, input: NewRole, actor: &ActorIdentity, now: DateTime<Utc>) -> Self {
        let details = format!("{} role '{}' created", input.role_type.as_str(), input.name);
        Self::with_created_entry(id, input, details, actor, now)
    }

    fn with_created_entry(
        id: String,
        input: NewRole,
        details: String,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            role_type: input.role_type,
            permissions: input.permissions,
            approval_authority_level: input.approval_authority_level,
            history: vec![RoleHistoryEntry {
                action: RoleHistoryAction::Created,
                details,
                timestamp: now,
                actor: actor.display_name().to_owned(),
            }],
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the stable role identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the role description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the role origin.
    #[must_use]
    pub fn role_type(&self) -> RoleType {
        self.role_type
    }

    /// Returns the permission matrix.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns the approval ranking.
    #[must_use]
    pub fn approval_authority_level(&self) -> ApprovalAuthorityLevel {
        self.approval_authority_level
    }

    /// Returns history entries, newest first.
    #[must_use]
    pub fn history(&self) -> &[RoleHistoryEntry] {
        self.history.as_slice()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest mutation.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the role may be deleted.
    #[must_use]
    pub fn is_deletable(&self) -> bool {
        self.role_type == RoleType::Custom
    }

    /// Fails with `Forbidden` for system roles.
    pub fn ensure_deletable(&self) -> AppResult<()> {
        if self.is_deletable() {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "system role '{}' cannot be deleted",
            self.name
        )))
    }

    /// Returns whether `name` matches this role's name, ignoring case and outer whitespace.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        normalized_name(self.name.as_str()) == normalized_name(name)
    }

    /// Applies a partial update and records an `Updated` history entry.
    pub fn apply_update(
        &mut self,
        update: RoleUpdate,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if update.is_empty() {
            return Err(AppError::Validation(
                "role update must set at least one field".to_owned(),
            ));
        }

        let mut changes = Vec::new();
        if let Some(name) = update.name {
            changes.push(format!("name '{}' -> '{}'", self.name, name));
            self.name = name;
        }
        if let Some(description) = update.description {
            changes.push("description".to_owned());
            self.description = description;
        }
        if let Some(level) = update.approval_authority_level {
            changes.push(format!(
                "approval authority level {} -> {}",
                self.approval_authority_level.value(),
                level.value()
            ));
            self.approval_authority_level = level;
        }

        self.record(
            RoleHistoryAction::Updated,
            format!("Updated {}", changes.join(", ")),
            actor,
            now,
        );
        Ok(())
    }

    /// Replaces the permission matrix and records a `Permission Change` history entry.
    pub fn replace_permissions(
        &mut self,
        permissions: PermissionSet,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) {
        let modules: Vec<&str> = permissions.iter().map(|row| row.module.as_str()).collect();
        let details = if modules.is_empty() {
            "Removed all module permissions".to_owned()
        } else {
            format!(
                "Permissions set for {} module(s): {}",
                modules.len(),
                modules.join(", ")
            )
        };

        self.permissions = permissions;
        self.record(RoleHistoryAction::PermissionChange, details, actor, now);
    }

    /// Creates a custom copy of this role under a new id and name.
    #[must_use]
    pub fn duplicate(
        &self,
        id: String,
        name: NonEmptyString,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> Self {
        let details = format!("Custom role '{}' duplicated from '{}'", name, self.name);
        Self::with_created_entry(
            id,
            NewRole {
                name,
                description: self.description.clone(),
                role_type: RoleType::Custom,
                permissions: self.permissions.clone(),
                approval_authority_level: self.approval_authority_level,
            },
            details,
            actor,
            now,
        )
    }

    fn record(
        &mut self,
        action: RoleHistoryAction,
        details: String,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) {
        self.history.insert(
            0,
            RoleHistoryEntry {
                action,
                details,
                timestamp: now,
                actor: actor.display_name().to_owned(),
            },
        );
        self.updated_at = now;
    }
}

/// Binding of one employee to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    id: String,
    employee_id: NonEmptyString,
    employee_name: String,
    role_id: String,
    role_name: String,
    assigned_by: String,
    assigned_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// Creates an assignment of `role` to an employee.
    #[must_use]
    pub fn new(
        id: String,
        employee_id: NonEmptyString,
        employee_name: NonEmptyString,
        role: &Role,
        assigned_by: &ActorIdentity,
        assigned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            employee_id,
            employee_name: employee_name.into(),
            role_id: role.id().to_owned(),
            role_name: role.name().as_str().to_owned(),
            assigned_by: assigned_by.display_name().to_owned(),
            assigned_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the employee identifier.
    #[must_use]
    pub fn employee_id(&self) -> &str {
        self.employee_id.as_str()
    }

    /// Returns the cached employee display name.
    #[must_use]
    pub fn employee_name(&self) -> &str {
        self.employee_name.as_str()
    }

    /// Returns the assigned role identifier.
    #[must_use]
    pub fn role_id(&self) -> &str {
        self.role_id.as_str()
    }

    /// Returns the cached role name.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role_name.as_str()
    }

    /// Returns the display name of the granting actor.
    #[must_use]
    pub fn assigned_by(&self) -> &str {
        self.assigned_by.as_str()
    }

    /// Returns the assignment timestamp.
    #[must_use]
    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns whether this assignment binds `employee_id` to `role_id`.
    #[must_use]
    pub fn binds(&self, employee_id: &str, role_id: &str) -> bool {
        self.employee_id.as_str() == employee_id && self.role_id == role_id
    }

    /// Refreshes the cached role name after a rename.
    pub fn refresh_role_name(&mut self, role: &Role) {
        if self.role_id == role.id() {
            self.role_name = role.name().as_str().to_owned();
        }
    }
}

fn normalized_name(value: &str) -> String {
    value.trim().to_lowercase()
}
