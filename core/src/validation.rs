//! Business rules for list and todo names.
//!
//! Both checks are pure functions returning a user-facing message, or `None`
//! when the name is acceptable. Callers run them before invoking the matching
//! [`ListStore`](crate::store::ListStore) mutation; stores persist whatever
//! they are given.

/// Shortest accepted name, in characters.
pub const MIN_NAME_LENGTH: usize = 1;

/// Longest accepted name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Message returned for a list name outside the allowed length.
pub const LIST_NAME_LENGTH_ERROR: &str = "List name must be between 1 and 100 characters.";

/// Message returned for a list name that is already taken.
pub const LIST_NAME_UNIQUE_ERROR: &str = "List name must be unique.";

/// Message returned for a todo name outside the allowed length.
pub const TODO_NAME_LENGTH_ERROR: &str = "Todo must be between 1 and 100 characters.";

fn has_valid_length(name: &str) -> bool {
    (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&name.chars().count())
}

/// Check a list name against the length bounds and the names already in use.
///
/// Length is checked first, so an over-long duplicate reports the length
/// problem.
///
/// # Examples
///
/// ```
/// use todo_lists_core::validation::list_name_error;
///
/// assert_eq!(list_name_error("Groceries", ["Chores"]), None);
/// assert!(list_name_error("Chores", ["Chores"]).is_some());
/// assert!(list_name_error("", Vec::<String>::new()).is_some());
/// ```
#[must_use]
pub fn list_name_error<I, S>(name: &str, existing_names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !has_valid_length(name) {
        return Some(LIST_NAME_LENGTH_ERROR.to_string());
    }

    if existing_names
        .into_iter()
        .any(|existing| existing.as_ref() == name)
    {
        return Some(LIST_NAME_UNIQUE_ERROR.to_string());
    }

    None
}

/// Check a todo name against the length bounds. Todo names need not be unique.
///
/// # Examples
///
/// ```
/// use todo_lists_core::validation::todo_name_error;
///
/// assert_eq!(todo_name_error("Milk"), None);
/// assert!(todo_name_error(&"x".repeat(101)).is_some());
/// ```
#[must_use]
pub fn todo_name_error(name: &str) -> Option<String> {
    if has_valid_length(name) {
        None
    } else {
        Some(TODO_NAME_LENGTH_ERROR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_unique_list_name() {
        assert_eq!(list_name_error("Groceries", ["Chores", "Work"]), None);
    }

    #[test]
    fn rejects_empty_list_name() {
        assert_eq!(
            list_name_error("", Vec::<String>::new()).as_deref(),
            Some(LIST_NAME_LENGTH_ERROR)
        );
    }

    #[test]
    fn rejects_duplicate_list_name() {
        assert_eq!(
            list_name_error("Chores", ["Chores"]).as_deref(),
            Some(LIST_NAME_UNIQUE_ERROR)
        );
    }

    #[test]
    fn length_error_wins_over_duplicate() {
        let long = "a".repeat(101);
        assert_eq!(
            list_name_error(&long, [long.clone()]).as_deref(),
            Some(LIST_NAME_LENGTH_ERROR)
        );
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(todo_name_error("a"), None);
        assert_eq!(todo_name_error(&"a".repeat(100)), None);
        assert!(todo_name_error(&"a".repeat(101)).is_some());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 100 two-byte characters
        let name = "é".repeat(100);
        assert_eq!(todo_name_error(&name), None);
        assert_eq!(list_name_error(&name, Vec::<String>::new()), None);
    }

    proptest! {
        #[test]
        fn todo_names_within_bounds_are_accepted(name in "[a-zA-Z0-9 ]{1,100}") {
            prop_assert_eq!(todo_name_error(&name), None);
        }

        #[test]
        fn names_over_limit_are_always_rejected(
            name in "[a-z]{101,200}",
            existing in proptest::collection::vec("[a-z]{1,10}", 0..5),
        ) {
            prop_assert!(todo_name_error(&name).is_some());
            prop_assert!(list_name_error(&name, &existing).is_some());
        }
    }
}
