//! Naming utilities for code generation

use heck::ToPascalCase;

/// Convert a column or table name to PascalCase
/// e.g., "org_id" -> "OrgId", "id" -> "Id"
pub fn to_pascal_case(identifier: &str) -> String {
    identifier.to_pascal_case()
}

/// Derive a class name from a table name, without the table prefix if one is given
/// e.g., ("lud_user_group", Some("lud")) -> "UserGroup"
pub fn class_name_from_table(table: &str, strip_prefix: Option<&str>) -> String {
    let name = strip_prefix
        .and_then(|prefix| table.strip_prefix(&format!("{}_", prefix)))
        .unwrap_or(table);
    to_pascal_case(name)
}

/// Lowercase the first character; generated PHP variables are named after their class
/// e.g., "OrderItem" -> "orderItem"
pub fn lc_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the accessor listing every value of a single-column row identifier
/// e.g., "id" -> "getAllIds", "category" -> "getAllCategories"
pub fn get_all_method_name(column: &str) -> String {
    let plural = pluralize(&column.to_lowercase());
    format!("getAll{}", to_pascal_case(&plural))
}

/// Pluralize a word using English grammar rules
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return word.to_string();
    }

    // Irregular plurals (common in database contexts)
    let irregulars: &[(&str, &str)] = &[
        ("person", "people"),
        ("child", "children"),
        ("man", "men"),
        ("woman", "women"),
        ("mouse", "mice"),
        ("index", "indices"),
        ("status", "statuses"),
    ];

    for (singular, plural) in irregulars {
        if word == *singular {
            return plural.to_string();
        }
    }

    // Words ending in -is → -es (analysis → analyses, basis → bases)
    if word.ends_with("is") && word.len() > 2 {
        return format!("{}es", &word[..word.len() - 2]);
    }

    // Words ending in -f or -fe → -ves (leaf → leaves, knife → knives)
    if let Some(stripped) = word.strip_suffix("fe") {
        return format!("{}ves", stripped);
    }
    let f_to_ves: &[&str] = &["leaf", "shelf", "self", "half", "calf", "loaf", "thief"];
    for &fword in f_to_ves {
        if word == fword {
            return format!("{}ves", &word[..word.len() - 1]);
        }
    }

    // Words ending in -o: some take -es
    let o_to_oes: &[&str] = &["hero", "potato", "tomato", "echo", "veto"];
    for &oword in o_to_oes {
        if word == oword {
            return format!("{}es", word);
        }
    }

    // -s, -x, -z, -ch, -sh → add -es
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{}es", word);
    }

    // Consonant + y → -ies
    if word.ends_with('y') && word.len() > 1 {
        let before_y = word.chars().nth(word.len() - 2).unwrap_or('_');
        if !"aeiou".contains(before_y) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    format!("{}s", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("id"), "Id");
        assert_eq!(to_pascal_case("org_id"), "OrgId");
        assert_eq!(to_pascal_case("permission_group_id"), "PermissionGroupId");
    }

    #[test]
    fn test_class_name_from_table() {
        assert_eq!(class_name_from_table("user", None), "User");
        assert_eq!(class_name_from_table("lud_user_group", Some("lud")), "UserGroup");
        // The prefix must be followed by an underscore
        assert_eq!(class_name_from_table("ludo_game", Some("lud")), "LudoGame");
        assert_eq!(class_name_from_table("orders", Some("lud")), "Orders");
    }

    #[test]
    fn test_lc_first() {
        assert_eq!(lc_first("OrderItem"), "orderItem");
        assert_eq!(lc_first("User"), "user");
        assert_eq!(lc_first(""), "");
    }

    #[test]
    fn test_get_all_method_name() {
        assert_eq!(get_all_method_name("id"), "getAllIds");
        assert_eq!(get_all_method_name("category"), "getAllCategories");
        assert_eq!(get_all_method_name("ID"), "getAllIds");
        assert_eq!(get_all_method_name("user_id"), "getAllUserIds");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("id"), "ids");
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("key"), "keys");
        assert_eq!(pluralize("analysis"), "analyses");
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("index"), "indices");
        assert_eq!(pluralize("hero"), "heroes");
        assert_eq!(pluralize("photo"), "photos");
    }
}
