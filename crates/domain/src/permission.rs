use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use staffdesk_core::AppError;

/// Functional areas of the suite that permissions are granted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AppModule {
    /// Landing dashboard and widgets.
    Dashboard,
    /// Employee directory and profiles.
    Employees,
    /// Attendance tracking.
    Attendance,
    /// Leave requests and balances.
    #[serde(rename = "Leave Management")]
    LeaveManagement,
    /// Payroll runs and payslips.
    Payroll,
    /// Performance reviews and goals.
    Performance,
    /// Recruitment pipeline.
    Recruitment,
    /// Company assets.
    Assets,
    /// Employee and company documents.
    Documents,
    /// Reporting.
    Reports,
    /// Organization settings.
    Settings,
    /// Role and permission administration.
    #[serde(rename = "Access Control")]
    AccessControl,
}

impl AppModule {
    /// Returns the stable transport value for this module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Employees => "Employees",
            Self::Attendance => "Attendance",
            Self::LeaveManagement => "Leave Management",
            Self::Payroll => "Payroll",
            Self::Performance => "Performance",
            Self::Recruitment => "Recruitment",
            Self::Assets => "Assets",
            Self::Documents => "Documents",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
            Self::AccessControl => "Access Control",
        }
    }

    /// Returns the closed module catalog.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AppModule] = &[
            AppModule::Dashboard,
            AppModule::Employees,
            AppModule::Attendance,
            AppModule::LeaveManagement,
            AppModule::Payroll,
            AppModule::Performance,
            AppModule::Recruitment,
            AppModule::Assets,
            AppModule::Documents,
            AppModule::Reports,
            AppModule::Settings,
            AppModule::AccessControl,
        ];

        ALL
    }
}

impl FromStr for AppModule {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|module| module.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown module '{value}'")))
    }
}

impl Display for AppModule {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Actions a role may be granted on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Read access.
    View,
    /// Record creation.
    Create,
    /// Record modification.
    Edit,
    /// Record removal.
    Delete,
    /// Workflow approval.
    Approve,
}

impl PermissionAction {
    /// Returns the stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Approve => "approve",
        }
    }

    /// Returns every action.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionAction] = &[
            PermissionAction::View,
            PermissionAction::Create,
            PermissionAction::Edit,
            PermissionAction::Delete,
            PermissionAction::Approve,
        ];

        ALL
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission action '{value}'")))
    }
}

/// Breadth of records a module permission applies to.
///
/// Variants are declared narrowest first so the derived ordering ranks breadth:
/// a wider scope is a superset of every narrower one for the same module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataScope {
    /// Only the subject's own records.
    #[serde(rename = "Self")]
    SelfOnly,
    /// Records of the subject's team.
    Team,
    /// Records of the subject's department.
    Department,
    /// Every record in the organization.
    Organization,
}

impl DataScope {
    /// Returns the stable transport value for this scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfOnly => "Self",
            Self::Team => "Team",
            Self::Department => "Department",
            Self::Organization => "Organization",
        }
    }

    /// Returns every scope, narrowest first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[DataScope] = &[
            DataScope::SelfOnly,
            DataScope::Team,
            DataScope::Department,
            DataScope::Organization,
        ];

        ALL
    }

    /// Returns whether this scope covers everything `other` covers.
    #[must_use]
    pub fn covers(&self, other: Self) -> bool {
        *self >= other
    }
}

impl FromStr for DataScope {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|scope| scope.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown data scope '{value}'")))
    }
}

/// Per-field access verdict, ordered from least to most permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAccessLevel {
    /// Field is masked.
    Hidden,
    /// Field is readable.
    View,
    /// Field is readable and writable.
    Edit,
}

/// Complete action flag record; every action is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionActions {
    /// Read access.
    pub view: bool,
    /// Record creation.
    pub create: bool,
    /// Record modification.
    pub edit: bool,
    /// Record removal.
    pub delete: bool,
    /// Workflow approval.
    pub approve: bool,
}

impl PermissionActions {
    /// Returns a record with every action denied.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns a record with every action granted.
    #[must_use]
    pub fn all() -> Self {
        Self {
            view: true,
            create: true,
            edit: true,
            delete: true,
            approve: true,
        }
    }

    /// Returns a record granting only the listed actions.
    #[must_use]
    pub fn only(actions: &[PermissionAction]) -> Self {
        let mut record = Self::none();
        for action in actions {
            record.set(*action, true);
        }
        record
    }

    /// Returns whether the action is granted.
    #[must_use]
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::View => self.view,
            PermissionAction::Create => self.create,
            PermissionAction::Edit => self.edit,
            PermissionAction::Delete => self.delete,
            PermissionAction::Approve => self.approve,
        }
    }

    /// Sets one action flag.
    pub fn set(&mut self, action: PermissionAction, granted: bool) {
        match action {
            PermissionAction::View => self.view = granted,
            PermissionAction::Create => self.create = granted,
            PermissionAction::Edit => self.edit = granted,
            PermissionAction::Delete => self.delete = granted,
            PermissionAction::Approve => self.approve = granted,
        }
    }

    /// Returns the per-action logical OR of both records.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            view: self.view || other.view,
            create: self.create || other.create,
            edit: self.edit || other.edit,
            delete: self.delete || other.delete,
            approve: self.approve || other.approve,
        }
    }

    /// Field verdict implied by these actions when a field has no explicit override.
    #[must_use]
    pub fn inherited_field_access(&self) -> FieldAccessLevel {
        if self.edit {
            FieldAccessLevel::Edit
        } else if self.view {
            FieldAccessLevel::View
        } else {
            FieldAccessLevel::Hidden
        }
    }
}

/// Permission matrix row granted on one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermission {
    /// Module the row applies to.
    pub module: AppModule,
    /// Action flags.
    pub actions: PermissionActions,
    /// Data visibility scope.
    pub scope: DataScope,
    /// Gate for sensitive fields and blocks, independent of `actions`.
    #[serde(default)]
    pub has_confidential_access: bool,
    /// Optional per-field overrides; absent fields inherit from `actions`.
    #[serde(default)]
    pub field_access: BTreeMap<String, FieldAccessLevel>,
}

impl ModulePermission {
    /// Creates a row without confidential access or field overrides.
    #[must_use]
    pub fn new(module: AppModule, actions: PermissionActions, scope: DataScope) -> Self {
        Self {
            module,
            actions,
            scope,
            has_confidential_access: false,
            field_access: BTreeMap::new(),
        }
    }

    /// Grants or revokes confidential access.
    #[must_use]
    pub fn with_confidential_access(mut self, granted: bool) -> Self {
        self.has_confidential_access = granted;
        self
    }

    /// Adds a field override.
    #[must_use]
    pub fn with_field_access(mut self, field: impl Into<String>, level: FieldAccessLevel) -> Self {
        self.field_access.insert(field.into(), level);
        self
    }

    /// Resolves the verdict for one field, falling back to the action flags.
    #[must_use]
    pub fn field_access_for(&self, field: &str) -> FieldAccessLevel {
        self.field_access
            .get(field)
            .copied()
            .unwrap_or_else(|| self.actions.inherited_field_access())
    }
}

/// Permission rows of one role, keyed uniquely by module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ModulePermission>", into = "Vec<ModulePermission>")]
pub struct PermissionSet(Vec<ModulePermission>);

impl PermissionSet {
    /// Creates a validated permission set.
    ///
    /// Rejects duplicate modules and blank field override names. Row order is kept.
    pub fn new(entries: Vec<ModulePermission>) -> Result<Self, AppError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.module) {
                return Err(AppError::Validation(format!(
                    "module '{}' appears more than once in the permission set",
                    entry.module
                )));
            }

            if entry.field_access.keys().any(|field| field.trim().is_empty()) {
                return Err(AppError::Validation(format!(
                    "module '{}' has a field override with an empty field name",
                    entry.module
                )));
            }
        }

        Ok(Self(entries))
    }

    /// Returns an empty permission set.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the row for a module, if granted.
    #[must_use]
    pub fn get(&self, module: AppModule) -> Option<&ModulePermission> {
        self.0.iter().find(|entry| entry.module == module)
    }

    /// Returns the rows in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[ModulePermission] {
        self.0.as_slice()
    }

    /// Iterates rows in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ModulePermission> {
        self.0.iter()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<ModulePermission>> for PermissionSet {
    type Error = AppError;

    fn try_from(value: Vec<ModulePermission>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermissionSet> for Vec<ModulePermission> {
    fn from(value: PermissionSet) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a ModulePermission;
    type IntoIter = std::slice::Iter<'a, ModulePermission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{
        AppModule, DataScope, FieldAccessLevel, ModulePermission, PermissionAction,
        PermissionActions, PermissionSet,
    };

    #[test]
    fn module_roundtrip_transport_value() {
        for module in AppModule::all() {
            let restored = AppModule::from_str(module.as_str());
            assert!(matches!(restored, Ok(value) if value == *module));
        }
    }

    #[test]
    fn unknown_module_is_rejected() {
        assert!(AppModule::from_str("Cafeteria").is_err());
    }

    #[test]
    fn module_serializes_with_display_name() {
        let encoded = serde_json::to_string(&AppModule::LeaveManagement).unwrap_or_default();
        assert_eq!(encoded, "\"Leave Management\"");
    }

    #[test]
    fn scope_orders_by_breadth() {
        assert!(DataScope::SelfOnly < DataScope::Team);
        assert!(DataScope::Team < DataScope::Department);
        assert!(DataScope::Department < DataScope::Organization);
        assert!(DataScope::Organization.covers(DataScope::Team));
        assert!(!DataScope::Team.covers(DataScope::Department));
    }

    #[test]
    fn scope_and_action_parse_transport_values() {
        for scope in DataScope::all() {
            assert!(matches!(DataScope::from_str(scope.as_str()), Ok(value) if value == *scope));
        }
        assert_eq!(
            PermissionAction::from_str("approve").ok(),
            Some(PermissionAction::Approve)
        );
        assert!(DataScope::from_str("Galaxy").is_err());
        assert!(PermissionAction::from_str("Approve").is_err());
    }

    #[test]
    fn self_scope_uses_reserved_transport_name() {
        let encoded = serde_json::to_string(&DataScope::SelfOnly).unwrap_or_default();
        assert_eq!(encoded, "\"Self\"");
    }

    #[test]
    fn actions_require_every_key() {
        let partial = serde_json::from_str::<PermissionActions>(r#"{"view":true}"#);
        assert!(partial.is_err());

        let complete = serde_json::from_str::<PermissionActions>(
            r#"{"view":true,"create":false,"edit":false,"delete":false,"approve":true}"#,
        );
        assert_eq!(
            complete.ok(),
            Some(PermissionActions::only(&[
                PermissionAction::View,
                PermissionAction::Approve
            ]))
        );
    }

    #[test]
    fn field_access_inherits_from_actions() {
        let row = ModulePermission::new(
            AppModule::Payroll,
            PermissionActions::only(&[PermissionAction::View]),
            DataScope::Team,
        )
        .with_field_access("salary", FieldAccessLevel::Hidden);

        assert_eq!(row.field_access_for("salary"), FieldAccessLevel::Hidden);
        assert_eq!(row.field_access_for("bank_account"), FieldAccessLevel::View);
    }

    #[test]
    fn permission_set_rejects_duplicate_modules() {
        let row = ModulePermission::new(
            AppModule::Payroll,
            PermissionActions::none(),
            DataScope::SelfOnly,
        );
        let result = PermissionSet::new(vec![row.clone(), row]);
        assert!(result.is_err());
    }

    #[test]
    fn permission_set_rejects_blank_field_names() {
        let row = ModulePermission::new(
            AppModule::Employees,
            PermissionActions::all(),
            DataScope::Organization,
        )
        .with_field_access(" ", FieldAccessLevel::Edit);
        assert!(PermissionSet::new(vec![row]).is_err());
    }

    #[test]
    fn permission_set_rejects_duplicates_on_deserialize() {
        let payload = r#"[
            {"module":"Payroll","actions":{"view":true,"create":false,"edit":false,"delete":false,"approve":false},"scope":"Team"},
            {"module":"Payroll","actions":{"view":false,"create":true,"edit":false,"delete":false,"approve":false},"scope":"Self"}
        ]"#;
        assert!(serde_json::from_str::<PermissionSet>(payload).is_err());
    }

    fn module_strategy() -> impl Strategy<Value = AppModule> {
        proptest::sample::select(AppModule::all().to_vec())
    }

    fn row_strategy() -> impl Strategy<Value = ModulePermission> {
        (module_strategy(), any::<[bool; 5]>()).prop_map(|(module, flags)| {
            ModulePermission::new(
                module,
                PermissionActions {
                    view: flags[0],
                    create: flags[1],
                    edit: flags[2],
                    delete: flags[3],
                    approve: flags[4],
                },
                DataScope::Team,
            )
        })
    }

    proptest! {
        #[test]
        fn accepted_sets_never_repeat_a_module(rows in proptest::collection::vec(row_strategy(), 0..8)) {
            if let Ok(set) = PermissionSet::new(rows) {
                let mut modules: Vec<AppModule> = set.iter().map(|row| row.module).collect();
                let total = modules.len();
                modules.sort();
                modules.dedup();
                prop_assert_eq!(modules.len(), total);
            }
        }
    }
}
