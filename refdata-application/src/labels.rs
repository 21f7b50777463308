//! 字段标签与帮助文本
//!
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldText {
    pub label: &'static str,
    pub help_text: &'static str,
}

const fn text(label: &'static str, help_text: &'static str) -> Option<FieldText> {
    Some(FieldText { label, help_text })
}

pub fn field_text(field: &str) -> Option<FieldText> {
    match field {
        "creation_time" => text("Creation time", "Instance creation time."),
        "creation_user" => text("Created by", "User who created object instance."),
        "deleted" => text("Deleted", "Controls instance logical deletion state."),
        "effective_user" => text(
            "Effective user",
            "User on whose behalf action was performed.",
        ),
        "enabled" => text("Enabled", "Controls instance enabled state."),
        "id" => text("Id", "Per entity type unique identifier."),
        "site" => text("Site", "Site associated with object instance."),
        "update_time" => text("Update time", "Instance last update time."),
        "update_user" => text("Updated by", "User who last updated instance."),
        "uuid" => text("Uuid", "Universal unique identifier."),
        "version" => text("Version", "Instance version id."),
        "alias" => text("Alias", "Alternative name."),
        "description" => text("Description", "Instance description."),
        "name" => text("Name", "Instance name."),
        "priority" => text("Priority", "Instance priority."),
        _ => None,
    }
}

/// 字段标签；未知字段原样返回
pub fn label(field: &str) -> &str {
    field_text(field).map_or(field, |t| t.label)
}
