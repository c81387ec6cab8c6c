//! Variables derived from a key column set
//!
//! A table's row identifier and each of its unique indexes are key column
//! sets. Every set yields one [`VariableBundle`], and every bundle one family
//! of get/update/delete methods named after its `by_string`.

use std::collections::BTreeMap;

use super::naming::to_pascal_case;
use crate::error::{CodegenError, Result};

/// Raw types whose PHP argument hint is `int`
const NUMERIC_TYPES: &[&str] = &[
    "bit",
    "bool",
    "boolean",
    "int",
    "integer",
    "tinyint",
    "smallint",
    "mediumint",
    "bigint",
    "decimal",
    "dec",
    "float",
    "double",
    "double_precision",
];

/// Type attributes that do not change the bucket
const TYPE_MODIFIERS: &[&str] = &["unsigned", "signed", "zerofill"];

/// The two argument hints a generated method can use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeBucket {
    Numeric,
    String,
}

impl TypeBucket {
    /// Bucket of a raw schema type such as `int(11)` or `varchar(128)`
    pub fn of(raw_type: &str) -> Self {
        if NUMERIC_TYPES.contains(&base_type(raw_type).as_str()) {
            TypeBucket::Numeric
        } else {
            TypeBucket::String
        }
    }

    pub fn php_hint(self) -> &'static str {
        match self {
            TypeBucket::Numeric => "int",
            TypeBucket::String => "string",
        }
    }
}

/// Strip the length/precision suffix and modifiers: `int(11) unsigned` -> `int`
fn base_type(raw_type: &str) -> String {
    let lowered = raw_type.to_lowercase();
    let without_length = lowered.split('(').next().unwrap_or_default();
    without_length
        .split_whitespace()
        .filter(|word| !TYPE_MODIFIERS.contains(word))
        .collect::<Vec<_>>()
        .join("_")
}

/// Strings substituted into method templates for one key column set.
///
/// Column order is preserved in every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableBundle {
    /// Method name suffix: `ById`, `ByOrgIdAndUserId`
    pub by_string: String,
    /// Doc phrase: `by the given org_id and user_id`
    pub by_the_given_string: String,
    /// Method arguments: `int $org_id, int $user_id`
    pub arg_string: String,
    /// Debug string: `org_id=$org_id, user_id=$user_id`
    pub variable_string: String,
    /// Where clause: `org_id=:org_id and user_id=:user_id`
    pub marker_string: String,
    /// Marker array lines: `"org_id" => $org_id,`
    pub marker_lines: Vec<String>,
    /// Doc lines: `* @param int $org_id`
    pub param_declarations: Vec<String>,
    /// Arguments at a call site: `$org_id, $user_id`
    pub called_variables: String,
}

/// Derive the variables of one key column set
pub fn derive_variables(
    columns: &[String],
    types: &BTreeMap<String, String>,
) -> Result<VariableBundle> {
    let mut bundle = VariableBundle::default();
    let mut given = Vec::with_capacity(columns.len());
    let mut args = Vec::with_capacity(columns.len());
    let mut debug = Vec::with_capacity(columns.len());
    let mut markers = Vec::with_capacity(columns.len());
    let mut called = Vec::with_capacity(columns.len());

    for (i, column) in columns.iter().enumerate() {
        let connector = if i == 0 { "By" } else { "And" };
        bundle.by_string.push_str(connector);
        bundle.by_string.push_str(&to_pascal_case(column));

        let raw_type = types.get(column).ok_or_else(|| {
            CodegenError::SchemaError(format!("no type known for column `{}`", column))
        })?;
        let hint = TypeBucket::of(raw_type).php_hint();

        given.push(column.as_str());
        args.push(format!("{} ${}", hint, column));
        debug.push(format!("{}=${}", column, column));
        markers.push(format!("{}=:{}", column, column));
        called.push(format!("${}", column));
        bundle
            .marker_lines
            .push(format!("\"{}\" => ${},", column, column));
        bundle
            .param_declarations
            .push(format!("* @param {} ${}", hint, column));
    }

    bundle.by_the_given_string = format!("by the given {}", given.join(" and "));
    bundle.arg_string = args.join(", ");
    bundle.variable_string = debug.join(", ");
    bundle.marker_string = markers.join(" and ");
    bundle.called_variables = called.join(", ");

    Ok(bundle)
}

/// Derive one bundle per unique index, in declaration order
pub fn derive_unique_index_variables(
    unique_indexes: &[Vec<String>],
    types: &BTreeMap<String, String>,
) -> Result<Vec<VariableBundle>> {
    unique_indexes
        .iter()
        .map(|columns| derive_variables(columns, types))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(c, t)| (c.to_string(), t.to_string()))
            .collect()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_column() {
        let bundle =
            derive_variables(&cols(&["id"]), &types(&[("id", "int(11)")])).unwrap();
        assert_eq!(bundle.by_string, "ById");
        assert_eq!(bundle.by_the_given_string, "by the given id");
        assert_eq!(bundle.arg_string, "int $id");
        assert_eq!(bundle.variable_string, "id=$id");
        assert_eq!(bundle.marker_string, "id=:id");
        assert_eq!(bundle.marker_lines, vec!["\"id\" => $id,"]);
        assert_eq!(bundle.param_declarations, vec!["* @param int $id"]);
        assert_eq!(bundle.called_variables, "$id");
    }

    #[test]
    fn test_composite_key_keeps_column_order() {
        let types = types(&[("org_id", "bigint(20)"), ("user_id", "varchar(36)")]);
        let bundle = derive_variables(&cols(&["user_id", "org_id"]), &types).unwrap();
        assert_eq!(bundle.by_string, "ByUserIdAndOrgId");
        assert_eq!(bundle.arg_string, "string $user_id, int $org_id");
        assert_eq!(bundle.variable_string, "user_id=$user_id, org_id=$org_id");
        assert_eq!(bundle.marker_string, "user_id=:user_id and org_id=:org_id");
        assert_eq!(
            bundle.marker_lines,
            vec!["\"user_id\" => $user_id,", "\"org_id\" => $org_id,"]
        );
        assert_eq!(bundle.called_variables, "$user_id, $org_id");
        assert_eq!(bundle.by_the_given_string, "by the given user_id and org_id");
    }

    #[test]
    fn test_numeric_bucket_is_exhaustive() {
        for raw in NUMERIC_TYPES {
            assert_eq!(TypeBucket::of(raw), TypeBucket::Numeric, "{}", raw);
        }
        assert_eq!(TypeBucket::of("int(11)"), TypeBucket::Numeric);
        assert_eq!(TypeBucket::of("decimal(10,2)"), TypeBucket::Numeric);
        assert_eq!(TypeBucket::of("INT(11) UNSIGNED"), TypeBucket::Numeric);
        assert_eq!(TypeBucket::of("bigint unsigned"), TypeBucket::Numeric);
        assert_eq!(TypeBucket::of("double precision"), TypeBucket::Numeric);
    }

    #[test]
    fn test_everything_else_is_a_string() {
        for raw in ["varchar(255)", "char(2)", "text", "datetime", "date", "enum('a','b')", "json"] {
            assert_eq!(TypeBucket::of(raw), TypeBucket::String, "{}", raw);
        }
    }

    #[test]
    fn test_missing_type_is_a_schema_error() {
        let err = derive_variables(&cols(&["id", "lang"]), &types(&[("id", "int")])).unwrap_err();
        assert!(matches!(err, CodegenError::SchemaError(msg) if msg.contains("lang")));
    }

    #[test]
    fn test_unique_index_bundles() {
        let types = types(&[("email", "varchar(128)"), ("app", "varchar(64)"), ("code", "varchar(64)")]);
        let bundles = derive_unique_index_variables(
            &[cols(&["email"]), cols(&["app", "code"])],
            &types,
        )
        .unwrap();
        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[0].by_string, "ByEmail");
        assert_eq!(bundles[1].by_string, "ByAppAndCode");
        assert_eq!(bundles[1].arg_string, "string $app, string $code");
    }
}
