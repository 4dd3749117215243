//! SQL text generation driven by a record type's declared schema.
//!
//! Pure functions, no I/O. Table and column names come straight from the
//! record declaration (compile-time literals), so they are spliced into the
//! statements verbatim; only values are bound as parameters.

use recordstore_core::record::FieldDef;

/// Catalog query for the lazy provisioning check. Binds the table name.
pub const TABLE_EXISTS: &str =
    "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

/// `CREATE TABLE` statement for a record type: an `id` primary key column
/// followed by one column per declared field, `DATE` for the date-only kinds
/// and `TEXT` otherwise.
pub fn create_table(table: &str, fields: &[FieldDef]) -> String {
    let mut sql = format!("CREATE TABLE {table} (id TEXT PRIMARY KEY");
    for field in fields {
        let column_type = if field.kind.is_date() { "DATE" } else { "TEXT" };
        sql.push_str(&format!(", {} {}", field.name, column_type));
    }
    sql.push(')');
    sql
}

/// Parameterized insert binding the identity plus every declared field, in
/// declaration order. `?1` is the identity.
pub fn insert(table: &str, fields: &[FieldDef]) -> String {
    let mut columns = String::from("id");
    let mut params = String::from("?1");
    for (i, field) in fields.iter().enumerate() {
        columns.push_str(", ");
        columns.push_str(field.name);
        params.push_str(&format!(", ?{}", i + 2));
    }
    format!("INSERT INTO {table} ({columns}) VALUES ({params})")
}

/// Point lookup by identity, selecting the identity and every declared field
/// in declaration order.
pub fn select_by_id(table: &str, fields: &[FieldDef]) -> String {
    let mut columns = String::from("id");
    for field in fields {
        columns.push_str(", ");
        columns.push_str(field.name);
    }
    format!("SELECT {columns} FROM {table} WHERE id = ?1")
}

/// Delete by identity. Matching zero rows is fine.
pub fn delete_by_id(table: &str) -> String {
    format!("DELETE FROM {table} WHERE id = ?1")
}

#[cfg(test)]
mod tests {
    use recordstore_core::record::FieldKind;

    use super::*;

    const FIELDS: &[FieldDef] = &[
        FieldDef::new("name", FieldKind::OptionalText),
        FieldDef::new("born_on", FieldKind::OptionalDate),
    ];

    #[test]
    fn test_create_table_types_columns_by_kind() {
        assert_eq!(
            create_table("demo", FIELDS),
            "CREATE TABLE demo (id TEXT PRIMARY KEY, name TEXT, born_on DATE)"
        );
    }

    #[test]
    fn test_insert_binds_identity_first() {
        assert_eq!(
            insert("demo", FIELDS),
            "INSERT INTO demo (id, name, born_on) VALUES (?1, ?2, ?3)"
        );
    }

    #[test]
    fn test_select_lists_columns_in_declaration_order() {
        assert_eq!(
            select_by_id("demo", FIELDS),
            "SELECT id, name, born_on FROM demo WHERE id = ?1"
        );
    }

    #[test]
    fn test_create_and_insert_column_order_match() {
        let create = create_table("demo", FIELDS);
        let insert = insert("demo", FIELDS);

        let create_columns: Vec<&str> = FIELDS
            .iter()
            .map(|f| f.name)
            .filter(|name| create.find(name).is_some() && insert.find(name).is_some())
            .collect();
        assert_eq!(create_columns.len(), FIELDS.len());

        // Same relative order in both statements.
        let positions_create: Vec<usize> = FIELDS
            .iter()
            .map(|f| create.find(f.name).unwrap())
            .collect();
        let positions_insert: Vec<usize> = FIELDS
            .iter()
            .map(|f| insert.find(f.name).unwrap())
            .collect();
        assert!(positions_create.windows(2).all(|w| w[0] < w[1]));
        assert!(positions_insert.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_schema_still_produces_valid_statements() {
        assert_eq!(create_table("empty", &[]), "CREATE TABLE empty (id TEXT PRIMARY KEY)");
        assert_eq!(insert("empty", &[]), "INSERT INTO empty (id) VALUES (?1)");
        assert_eq!(select_by_id("empty", &[]), "SELECT id FROM empty WHERE id = ?1");
    }

    #[test]
    fn test_delete_by_id() {
        assert_eq!(delete_by_id("demo"), "DELETE FROM demo WHERE id = ?1");
    }
}
