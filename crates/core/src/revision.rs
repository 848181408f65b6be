//! The fixed table list, constraints and index of revision `dded3119c1fe`.

use serde::Serialize;

use crate::schema::{IndexSpec, UniqueConstraint};
use crate::step::{Batch, Step};
use crate::table_meta::TableMeta;

pub const REVISION: &str = "dded3119c1fe";
pub const DOWN_REVISION: &str = "0341b154f79a";
pub const MESSAGE: &str = "added unique constraints";

/// Tables deduplicated before their constraints are installed, in run order.
pub const DEDUP_TABLES: [TableMeta; 14] = [
    // M2M
    TableMeta::new("cookbooks_to_categories", "cookbook_id", "category_id"),
    TableMeta::new("cookbooks_to_tags", "cookbook_id", "tag_id"),
    TableMeta::new("cookbooks_to_tools", "cookbook_id", "tool_id"),
    TableMeta::new("group_to_categories", "group_id", "category_id"),
    TableMeta::new("plan_rules_to_categories", "group_plan_rule_id", "category_id"),
    TableMeta::new("plan_rules_to_tags", "plan_rule_id", "tag_id"),
    TableMeta::new("recipes_to_categories", "recipe_id", "category_id"),
    TableMeta::new("recipes_to_tags", "recipe_id", "tag_id"),
    TableMeta::new("recipes_to_tools", "recipe_id", "tool_id"),
    TableMeta::new("users_to_favorites", "user_id", "recipe_id"),
    TableMeta::new("shopping_lists_multi_purpose_labels", "shopping_list_id", "label_id"),
    // Foods/Units/Labels
    TableMeta::new("ingredient_foods", "name", "group_id"),
    TableMeta::new("ingredient_units", "name", "group_id"),
    TableMeta::new("multi_purpose_labels", "name", "group_id"),
];

pub const COOKBOOK_ID_CATEGORY_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "cookbook_id_category_id_key",
    "cookbooks_to_categories",
    ["cookbook_id", "category_id"],
);
pub const COOKBOOK_ID_TAG_ID_KEY: UniqueConstraint =
    UniqueConstraint::new("cookbook_id_tag_id_key", "cookbooks_to_tags", ["cookbook_id", "tag_id"]);
pub const COOKBOOK_ID_TOOL_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "cookbook_id_tool_id_key",
    "cookbooks_to_tools",
    ["cookbook_id", "tool_id"],
);
pub const GROUP_ID_CATEGORY_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "group_id_category_id_key",
    "group_to_categories",
    ["group_id", "category_id"],
);
pub const GROUP_PLAN_RULE_ID_CATEGORY_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "group_plan_rule_id_category_id_key",
    "plan_rules_to_categories",
    ["group_plan_rule_id", "category_id"],
);
pub const PLAN_RULE_ID_TAG_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "plan_rule_id_tag_id_key",
    "plan_rules_to_tags",
    ["plan_rule_id", "tag_id"],
);
pub const RECIPE_ID_CATEGORY_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "recipe_id_category_id_key",
    "recipes_to_categories",
    ["recipe_id", "category_id"],
);
pub const RECIPE_ID_TAG_ID_KEY: UniqueConstraint =
    UniqueConstraint::new("recipe_id_tag_id_key", "recipes_to_tags", ["recipe_id", "tag_id"]);
pub const RECIPE_ID_TOOL_ID_KEY: UniqueConstraint =
    UniqueConstraint::new("recipe_id_tool_id_key", "recipes_to_tools", ["recipe_id", "tool_id"]);
pub const USER_ID_RECIPE_ID_KEY: UniqueConstraint =
    UniqueConstraint::new("user_id_recipe_id_key", "users_to_favorites", ["user_id", "recipe_id"]);
pub const SHOPPING_LIST_ID_LABEL_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "shopping_list_id_label_id_key",
    "shopping_lists_multi_purpose_labels",
    ["shopping_list_id", "label_id"],
);
pub const INGREDIENT_FOODS_NAME_GROUP_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "ingredient_foods_name_group_id_key",
    "ingredient_foods",
    ["name", "group_id"],
);
pub const INGREDIENT_UNITS_NAME_GROUP_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "ingredient_units_name_group_id_key",
    "ingredient_units",
    ["name", "group_id"],
);
pub const MULTI_PURPOSE_LABELS_NAME_GROUP_ID_KEY: UniqueConstraint = UniqueConstraint::new(
    "multi_purpose_labels_name_group_id_key",
    "multi_purpose_labels",
    ["name", "group_id"],
);

/// Constraints in upgrade order; one per entry of [`DEDUP_TABLES`].
pub const UNIQUE_CONSTRAINTS: [UniqueConstraint; 14] = [
    COOKBOOK_ID_CATEGORY_ID_KEY,
    COOKBOOK_ID_TAG_ID_KEY,
    COOKBOOK_ID_TOOL_ID_KEY,
    GROUP_ID_CATEGORY_ID_KEY,
    GROUP_PLAN_RULE_ID_CATEGORY_ID_KEY,
    PLAN_RULE_ID_TAG_ID_KEY,
    RECIPE_ID_CATEGORY_ID_KEY,
    RECIPE_ID_TAG_ID_KEY,
    RECIPE_ID_TOOL_ID_KEY,
    USER_ID_RECIPE_ID_KEY,
    SHOPPING_LIST_ID_LABEL_ID_KEY,
    INGREDIENT_FOODS_NAME_GROUP_ID_KEY,
    INGREDIENT_UNITS_NAME_GROUP_ID_KEY,
    MULTI_PURPOSE_LABELS_NAME_GROUP_ID_KEY,
];

pub const CREATED_AT_INDEX: IndexSpec = IndexSpec::new(
    "ix_shopping_lists_multi_purpose_labels_created_at",
    "shopping_lists_multi_purpose_labels",
    "created_at",
);

/// Dedup every table (one transaction each), then install constraints and
/// the index in a single transaction.
#[must_use]
pub fn upgrade_plan() -> Vec<Batch> {
    let mut plan: Vec<Batch> = DEDUP_TABLES
        .iter()
        .map(|meta| {
            Batch::new(format!("deduplicate {}", meta.tablename), vec![Step::Deduplicate(*meta)])
        })
        .collect();

    let mut ddl: Vec<Step> = UNIQUE_CONSTRAINTS.iter().copied().map(Step::AddUnique).collect();
    ddl.push(Step::CreateIndex(CREATED_AT_INDEX));
    plan.push(Batch::new("add unique constraints", ddl));
    plan
}

/// Drops everything [`upgrade_plan`] installed. Removed duplicates stay removed.
#[must_use]
pub fn downgrade_plan() -> Vec<Batch> {
    let steps = vec![
        // M2M
        Step::DropUnique(USER_ID_RECIPE_ID_KEY),
        Step::DropIndex(CREATED_AT_INDEX),
        Step::DropUnique(RECIPE_ID_TOOL_ID_KEY),
        Step::DropUnique(RECIPE_ID_TAG_ID_KEY),
        Step::DropUnique(RECIPE_ID_CATEGORY_ID_KEY),
        Step::DropUnique(PLAN_RULE_ID_TAG_ID_KEY),
        Step::DropUnique(GROUP_PLAN_RULE_ID_CATEGORY_ID_KEY),
        Step::DropUnique(GROUP_ID_CATEGORY_ID_KEY),
        Step::DropUnique(COOKBOOK_ID_TOOL_ID_KEY),
        Step::DropUnique(COOKBOOK_ID_TAG_ID_KEY),
        Step::DropUnique(COOKBOOK_ID_CATEGORY_ID_KEY),
        Step::DropUnique(SHOPPING_LIST_ID_LABEL_ID_KEY),
        // Foods/Units/Labels
        Step::DropUnique(MULTI_PURPOSE_LABELS_NAME_GROUP_ID_KEY),
        Step::DropUnique(INGREDIENT_UNITS_NAME_GROUP_ID_KEY),
        Step::DropUnique(INGREDIENT_FOODS_NAME_GROUP_ID_KEY),
    ];
    vec![Batch::new("drop unique constraints", steps)]
}

/// Serializable summary printed by `dedup-migrate info`.
#[derive(Debug, Clone, Serialize)]
pub struct RevisionInfo {
    pub revision: &'static str,
    pub down_revision: &'static str,
    pub message: &'static str,
    pub tables: Vec<TableMeta>,
    pub unique_constraints: Vec<&'static str>,
    pub index: &'static str,
}

impl RevisionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            revision: REVISION,
            down_revision: DOWN_REVISION,
            message: MESSAGE,
            tables: DEDUP_TABLES.to_vec(),
            unique_constraints: UNIQUE_CONSTRAINTS.iter().map(|c| c.name).collect(),
            index: CREATED_AT_INDEX.name,
        }
    }
}
