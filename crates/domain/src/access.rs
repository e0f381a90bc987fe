use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::permission::{
    AppModule, DataScope, FieldAccessLevel, ModulePermission, PermissionAction,
    PermissionActions,
};
use crate::role::Role;

/// Module-by-module permissions a subject holds through all of their roles.
///
/// Built by [`EffectivePermissions::compose`]. Modules no role grants are absent,
/// which means no access at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermissions {
    modules: BTreeMap<AppModule, ModulePermission>,
}

impl EffectivePermissions {
    /// Composes the most permissive union of the given roles' permission rows.
    ///
    /// Per module: actions are OR'd, the widest scope wins, confidential access is
    /// OR'd, and each field that any role overrides resolves to the most permissive
    /// verdict, where a role without an override contributes the verdict implied by
    /// its own actions.
    #[must_use]
    pub fn compose<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let mut grouped: BTreeMap<AppModule, Vec<&ModulePermission>> = BTreeMap::new();
        for role in roles {
            for row in role.permissions() {
                grouped.entry(row.module).or_default().push(row);
            }
        }

        let modules = grouped
            .into_iter()
            .filter_map(|(module, rows)| compose_module(module, &rows).map(|row| (module, row)))
            .collect();

        Self { modules }
    }

    /// Returns the composed row for a module.
    #[must_use]
    pub fn get(&self, module: AppModule) -> Option<&ModulePermission> {
        self.modules.get(&module)
    }

    /// Returns whether the action is granted on the module.
    #[must_use]
    pub fn allows(&self, module: AppModule, action: PermissionAction) -> bool {
        self.get(module)
            .is_some_and(|row| row.actions.allows(action))
    }

    /// Returns whether the action is granted on the module over at least `scope`.
    #[must_use]
    pub fn allows_within(
        &self,
        module: AppModule,
        action: PermissionAction,
        scope: DataScope,
    ) -> bool {
        self.get(module)
            .is_some_and(|row| row.actions.allows(action) && row.scope.covers(scope))
    }

    /// Resolves the verdict for one field of a module.
    #[must_use]
    pub fn field_access(&self, module: AppModule, field: &str) -> FieldAccessLevel {
        self.get(module)
            .map_or(FieldAccessLevel::Hidden, |row| row.field_access_for(field))
    }

    /// Iterates composed rows in module catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ModulePermission> {
        self.modules.values()
    }

    /// Returns the number of modules with any contributing row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns whether no module is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn compose_module(module: AppModule, rows: &[&ModulePermission]) -> Option<ModulePermission> {
    let first = rows.first()?;

    let actions = rows
        .iter()
        .fold(PermissionActions::none(), |acc, row| acc.union(&row.actions));
    let scope = rows.iter().map(|row| row.scope).max().unwrap_or(first.scope);
    let has_confidential_access = rows.iter().any(|row| row.has_confidential_access);

    let overridden: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.field_access.keys().map(String::as_str))
        .collect();
    let mut field_access = BTreeMap::new();
    for field in overridden {
        for row in rows {
            let verdict = row.field_access_for(field);
            match field_access.entry(field.to_owned()) {
                Entry::Vacant(slot) => {
                    slot.insert(verdict);
                }
                Entry::Occupied(mut slot) => {
                    if verdict > *slot.get() {
                        slot.insert(verdict);
                    }
                }
            }
        }
    }

    Some(ModulePermission {
        module,
        actions,
        scope,
        has_confidential_access,
        field_access,
    })
}
