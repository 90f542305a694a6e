use todo_core::ServiceError;

use crate::model::TaskFields;

pub const NAME_REQUIRED: &str = "Task name is required. Please provide a valid task name.";
pub const DESC_REQUIRED: &str = "Task description is required. Please provide a description.";
pub const DATE_REQUIRED: &str = "Due date is required. Please select a date.";
pub const PRIORITY_REQUIRED: &str = "Priority is required. Please select a priority level.";

/// Check the four content fields in order (name, description, date,
/// priority) and report only the first missing one.
///
/// Name and description must be non-blank after trimming; date and
/// priority only need to be non-empty. Accepted values are kept as
/// submitted.
pub fn validate_task_input(
    name: Option<&str>,
    desc: Option<&str>,
    date: Option<&str>,
    pr: Option<&str>,
) -> Result<TaskFields, ServiceError> {
    let name = non_blank(name).ok_or_else(|| missing(NAME_REQUIRED))?;
    let desc = non_blank(desc).ok_or_else(|| missing(DESC_REQUIRED))?;
    let date = non_empty(date).ok_or_else(|| missing(DATE_REQUIRED))?;
    let pr = non_empty(pr).ok_or_else(|| missing(PRIORITY_REQUIRED))?;

    Ok(TaskFields {
        name: name.to_string(),
        desc: desc.to_string(),
        date: date.to_string(),
        pr: pr.to_string(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn missing(message: &str) -> ServiceError {
    ServiceError::MissingField(message.to_string())
}
