//! Dameng schema introspection.
//!
//! Tables, columns and indexes are read from the Dameng system catalog
//! through any [`Queryer`]. Schema and table names are always bound as
//! parameters. Each row set is dropped on every exit path, which releases
//! the driver cursor.

use std::collections::HashMap;

use oxide_schema::types::{BINARY, DECIMAL, NUMBER, NUMERIC, TEXT, TIME_STAMP, TIME_STAMPZ, VARCHAR};
use oxide_schema::{
    BoxError, Column, Dialect, Index, IndexKind, Introspect, Queryer, Row, SqlType, SqlValue,
    Table,
};
use tracing::{debug, trace, warn};

use crate::clob::ClobScanner;
use crate::dialect::{seq_name, DamengDialect};
use crate::error::{DamengError, Result};

const TABLES_SQL: &str = "select table_name from all_tables where owner = ? and temporary = 'N' AND table_name not like ?";

const PRIMARY_KEYS_SQL: &str = concat!(
    "select column_name from user_cons_columns where owner = ? and constraint_name = ",
    "(select constraint_name from user_constraints where owner = ? and table_name = ? ",
    "and constraint_type ='P')"
);

const COLUMNS_SQL: &str = concat!(
    "select atc.column_name, atc.data_default, atc.data_type, atc.data_length, ",
    "atc.data_precision, atc.data_scale, atc.nullable, ucc.comments ",
    "from all_tab_cols as atc left join user_col_comments as ucc ",
    "on ucc.table_name=atc.table_name and ucc.column_name=atc.column_name ",
    "and atc.owner = ucc.owner where atc.table_name = ? and ucc.owner = ?"
);

const SEQUENCE_SQL: &str =
    "SELECT * FROM ALL_SEQUENCES WHERE SEQUENCE_OWNER = ? AND SEQUENCE_NAME = ?";

const INDEXES_SQL: &str = concat!(
    "select t.column_name, i.uniqueness, i.index_name FROM all_ind_columns t ",
    "left join all_indexes i on t.table_name = i.table_name ",
    "and i.table_owner = t.table_owner and t.index_name = i.index_name ",
    "WHERE t.table_name = ? and i.owner = ? and t.index_name not in ",
    "(select index_name from all_constraints where constraint_type='P' ",
    "and table_name = ? and owner = ?)"
);

const NAME_TRIM: &[char] = &['"', ' '];

/// Internal queue type that never surfaces as a user column.
const IGNORED_NATIVE_TYPE: &str = "AQ$_SUBSCRIBERS";

/// Runs `sql` and hands every row to `f`, stopping at the first error.
fn for_each_row<Q, F>(db: &Q, sql: &str, args: &[SqlValue], mut f: F) -> Result<()>
where
    Q: Queryer,
    F: FnMut(Row) -> Result<()>,
{
    let rows = db.query(sql, args).map_err(DamengError::Driver)?;
    for row in rows {
        f(row.map_err(DamengError::Driver)?)?;
    }
    Ok(())
}

/// Splits a catalog type such as `NUMBER(10,2)` or
/// `TIMESTAMP(6) WITH TIME ZONE` into its base name and length parameters.
///
/// The parenthesized part is removed from the name; any text after it is
/// kept. Unparsable lengths read as zero.
#[must_use]
pub fn decompose_native_type(data_type: &str) -> (String, usize, usize) {
    let Some((base, rest)) = data_type.split_once('(') else {
        return (data_type.trim().to_string(), 0, 0);
    };
    let (inner, tail) = rest.split_once(')').unwrap_or((rest, ""));
    let mut lens = inner
        .split(',')
        .map(|len| len.trim().parse::<usize>().unwrap_or(0));
    let len1 = lens.next().unwrap_or(0);
    let len2 = lens.next().unwrap_or(0);
    (format!("{}{}", base.trim(), tail.trim_end()), len1, len2)
}

/// Maps a decomposed catalog type back to the abstract vocabulary.
///
/// Returns `None` for internal types that are skipped.
#[must_use]
pub fn native_to_sql_type(base: &str, len1: usize, len2: usize) -> Option<SqlType> {
    let upper = base.to_uppercase();
    let sql_type = match upper.as_str() {
        "VARCHAR" | "VARCHAR2" => SqlType::with_lengths(VARCHAR, len1, len2),
        "TIMESTAMP WITH TIME ZONE" => SqlType::with_lengths(TIME_STAMPZ, len1, 0),
        "NUMBER" => SqlType::with_lengths(NUMBER, len1, len2),
        "LONG" | "LONG RAW" | "NCLOB" | "CLOB" | "TEXT" => SqlType::new(TEXT),
        "RAW" => SqlType::new(BINARY),
        "ROWID" => SqlType::with_lengths(VARCHAR, 18, 0),
        IGNORED_NATIVE_TYPE => return None,
        _ => SqlType::with_lengths(upper, len1, len2),
    };
    Some(sql_type)
}

/// Parses a full catalog type string into an abstract type.
///
/// Returns `None` for ignored internal types.
#[must_use]
pub fn parse_native_type(data_type: &str) -> Option<SqlType> {
    let (base, len1, len2) = decompose_native_type(data_type);
    native_to_sql_type(&base, len1, len2)
}

/// Wraps `value` in single quotes unless it already is quoted.
fn add_single_quote(value: &str) -> String {
    if value.len() < 2 || (value.starts_with('\'') && value.ends_with('\'')) {
        return value.to_string();
    }
    format!("'{value}'")
}

fn to_length(value: Option<i64>) -> usize {
    value.and_then(|v| usize::try_from(v).ok()).unwrap_or(0)
}

/// Raw catalog metadata for one column.
struct ColumnRow {
    name: String,
    default: ClobScanner,
    data_type: String,
    data_length: Option<i64>,
    data_precision: Option<i64>,
    data_scale: Option<i64>,
    nullable: Option<String>,
    comment: Option<String>,
}

impl ColumnRow {
    fn scan(row: &Row) -> Result<Self> {
        let name: Option<String> = row.get(0)?;
        let name = name.ok_or(DamengError::NullColumnName)?;
        let data_precision: Option<String> = row.get(4)?;
        Ok(Self {
            name: name.trim_matches(NAME_TRIM).to_string(),
            default: row.get(1)?,
            data_type: row.get::<Option<String>>(2)?.unwrap_or_default(),
            data_length: row.get(3)?,
            data_precision: data_precision.and_then(|p| p.trim().parse().ok()),
            data_scale: row.get(5)?,
            nullable: row.get(6)?,
            comment: row.get(7)?,
        })
    }

    /// Length parameters for the mapped type.
    fn lengths(&self, sql_type: &SqlType) -> (usize, usize) {
        if sql_type.name == TIME_STAMP {
            return (to_length(self.data_scale), 0);
        }
        if sql_type.default_length > 0 {
            return (sql_type.default_length, sql_type.default_length2);
        }
        if matches!(sql_type.name.as_str(), NUMERIC | DECIMAL | NUMBER) {
            return (to_length(self.data_precision), to_length(self.data_scale));
        }
        (to_length(self.data_length), 0)
    }
}

impl DamengDialect {
    fn primary_keys<Q: Queryer>(&self, db: &Q, table_name: &str) -> Result<Vec<String>> {
        let args = [
            SqlValue::from(self.schema()),
            SqlValue::from(self.schema()),
            SqlValue::from(table_name),
        ];
        debug!(sql = PRIMARY_KEYS_SQL, table = table_name, "Querying primary key");
        let mut pk_names = Vec::new();
        for_each_row(db, PRIMARY_KEYS_SQL, &args, |row| {
            let name: String = row.get(0)?;
            pk_names.push(name);
            Ok(())
        })?;
        Ok(pk_names)
    }

    fn has_sequence<Q: Queryer>(&self, db: &Q, table_name: &str) -> Result<bool> {
        let args = [
            SqlValue::from(self.schema()),
            SqlValue::from(seq_name(table_name)),
        ];
        db.has_records(SEQUENCE_SQL, &args).map_err(DamengError::Driver)
    }

    fn build_column<Q: Queryer>(
        &self,
        db: &Q,
        table_name: &str,
        pk_names: &[String],
        raw: ColumnRow,
    ) -> Result<Option<Column>> {
        let Some(sql_type) = parse_native_type(&raw.data_type) else {
            debug!(
                table = table_name,
                column = %raw.name,
                native = %raw.data_type,
                "Ignoring internal column"
            );
            return Ok(None);
        };

        if !sql_type.is_registered() {
            warn!(
                table = table_name,
                column = %raw.name,
                native = %raw.data_type,
                mapped = %sql_type.name,
                "Unknown column type"
            );
            return Err(DamengError::UnknownColumnType {
                data_type: raw.data_type,
                sql_type: sql_type.name,
            });
        }

        let (length, length2) = raw.lengths(&sql_type);
        let mut col = Column::new(raw.name, sql_type);
        col.length = length;
        col.length2 = length2;
        col.nullable = raw.nullable.as_deref() == Some("Y");
        col.comment = raw.comment.unwrap_or_default();

        match raw.default.into_option() {
            Some(default) => {
                col.default = default;
                col.default_is_empty = false;
            }
            None => col.default_is_empty = true,
        }

        if pk_names.contains(&col.name) {
            col.is_primary_key = true;
            col.is_auto_increment = self.has_sequence(db, table_name)?;
        }

        if col.sql_type.is_time()
            && !col.default_is_empty
            && !col.default.eq_ignore_ascii_case("CURRENT_TIMESTAMP")
        {
            col.default = add_single_quote(&col.default);
        }

        trace!(
            column = %col.name,
            native = %raw.data_type,
            sql_type = %col.sql_type.name,
            "Mapped column"
        );
        Ok(Some(col))
    }
}

impl Introspect for DamengDialect {
    type Error = DamengError;

    fn get_tables<Q: Queryer>(&self, db: &Q) -> Result<Vec<Table>> {
        let args = [SqlValue::from(self.schema()), SqlValue::from("%$%")];
        debug!(sql = TABLES_SQL, schema = self.schema(), "Listing tables");

        let mut tables = Vec::new();
        for_each_row(db, TABLES_SQL, &args, |row| {
            let name: String = row.get(0)?;
            tables.push(Table::new(name));
            Ok(())
        })?;
        Ok(tables)
    }

    fn get_columns<Q: Queryer>(
        &self,
        db: &Q,
        table_name: &str,
    ) -> Result<(Vec<String>, HashMap<String, Column>)> {
        let pk_names = self.primary_keys(db, table_name)?;

        let args = [SqlValue::from(table_name), SqlValue::from(self.schema())];
        debug!(sql = COLUMNS_SQL, table = table_name, "Querying columns");

        let mut seq = Vec::new();
        let mut cols = HashMap::new();
        for_each_row(db, COLUMNS_SQL, &args, |row| {
            let raw = ColumnRow::scan(&row)?;
            if let Some(col) = self.build_column(db, table_name, &pk_names, raw)? {
                seq.push(col.name.clone());
                cols.insert(col.name.clone(), col);
            }
            Ok(())
        })?;
        Ok((seq, cols))
    }

    fn get_indexes<Q: Queryer>(
        &self,
        db: &Q,
        table_name: &str,
    ) -> Result<HashMap<String, Index>> {
        let args = [
            SqlValue::from(table_name),
            SqlValue::from(self.schema()),
            SqlValue::from(table_name),
            SqlValue::from(self.schema()),
        ];
        debug!(sql = INDEXES_SQL, table = table_name, "Querying indexes");

        let mut indexes: HashMap<String, Index> = HashMap::new();
        for_each_row(db, INDEXES_SQL, &args, |row| {
            let col_name: String = row.get(0)?;
            let uniqueness: Option<String> = row.get(1)?;
            let stored: String = row.get(2)?;

            let stored = stored.trim_matches(NAME_TRIM);
            let (name, is_regular) = Index::strip_regular_name(stored, table_name);
            let kind = if uniqueness.as_deref() == Some("UNIQUE") {
                IndexKind::Unique
            } else {
                IndexKind::Index
            };

            let index = indexes.entry(name).or_insert_with_key(|name| {
                let mut index = Index::new(name.clone(), kind);
                index.is_regular = is_regular;
                index
            });
            index.add_column(col_name.trim_matches(NAME_TRIM));
            Ok(())
        })?;
        Ok(indexes)
    }
}

/// Runs a dialect's table existence check.
pub fn table_exists<Q: Queryer>(
    dialect: &DamengDialect,
    db: &Q,
    table_name: &str,
) -> std::result::Result<bool, BoxError> {
    let (sql, args) = dialect.table_check_sql(table_name);
    db.has_records(&sql, &args)
}

#[cfg(test)]
mod tests {
    use oxide_schema::types::{BIG_INT, INT, INTEGER};
    use oxide_schema::{DbType, Uri};

    use super::*;

    fn round_trip(col: &Column) -> SqlType {
        let dialect = DamengDialect::new(Uri::for_schema(DbType::Dameng, "APP"));
        parse_native_type(&dialect.sql_type(col)).unwrap()
    }

    #[test]
    fn decomposes_lengths_and_tail() {
        assert_eq!(decompose_native_type("INTEGER"), ("INTEGER".to_string(), 0, 0));
        assert_eq!(
            decompose_native_type("NUMBER(10,2)"),
            ("NUMBER".to_string(), 10, 2)
        );
        assert_eq!(
            decompose_native_type("VARCHAR2(64)"),
            ("VARCHAR2".to_string(), 64, 0)
        );
        assert_eq!(
            decompose_native_type("TIMESTAMP(6) WITH TIME ZONE"),
            ("TIMESTAMP WITH TIME ZONE".to_string(), 6, 0)
        );
        assert_eq!(decompose_native_type("BINARY(MAX)"), ("BINARY".to_string(), 0, 0));
    }

    #[test]
    fn reverse_mapping() {
        assert_eq!(
            parse_native_type("VARCHAR2(20)").unwrap(),
            SqlType::with_lengths(VARCHAR, 20, 0)
        );
        assert_eq!(parse_native_type("CLOB").unwrap(), SqlType::new(TEXT));
        assert_eq!(parse_native_type("LONG RAW").unwrap(), SqlType::new(TEXT));
        assert_eq!(parse_native_type("RAW").unwrap(), SqlType::new(BINARY));
        assert_eq!(
            parse_native_type("ROWID").unwrap(),
            SqlType::with_lengths(VARCHAR, 18, 0)
        );
        assert_eq!(parse_native_type("bigint").unwrap(), SqlType::new(BIG_INT));
        assert!(parse_native_type("AQ$_SUBSCRIBERS").is_none());
    }

    #[test]
    fn rendered_types_round_trip() {
        let int = Column::new("a", SqlType::new(INT));
        assert_eq!(round_trip(&int), SqlType::new(INTEGER));

        let varchar = Column::new("b", SqlType::new(VARCHAR)).length(64, 0);
        assert_eq!(round_trip(&varchar), SqlType::with_lengths(VARCHAR, 64, 0));

        let numeric = Column::new("c", SqlType::new(NUMERIC)).length(10, 2);
        assert_eq!(round_trip(&numeric), SqlType::with_lengths(NUMERIC, 10, 2));

        let ts = Column::new("d", SqlType::new(TIME_STAMP)).length(6, 0);
        assert_eq!(round_trip(&ts), SqlType::with_lengths(TIME_STAMP, 6, 0));

        let tsz = Column::new("e", SqlType::new(TIME_STAMPZ)).length(6, 0);
        assert_eq!(round_trip(&tsz), SqlType::with_lengths(TIME_STAMPZ, 6, 0));

        let tsz = Column::new("f", SqlType::new(TIME_STAMPZ));
        assert_eq!(round_trip(&tsz), SqlType::new(TIME_STAMPZ));
    }

    #[test]
    fn single_quotes_are_added_once() {
        assert_eq!(add_single_quote("2024-01-01"), "'2024-01-01'");
        assert_eq!(add_single_quote("'2024-01-01'"), "'2024-01-01'");
        assert_eq!(add_single_quote("0"), "0");
    }
}
