//! Dameng SQL dialect.

use std::borrow::Cow;
use std::fmt::{self, Write};

use oxide_schema::quoter::always_reserve;
use oxide_schema::types::{
    BIG_INT, BIG_SERIAL, BINARY, BIT, BLOB, BOOL, BOOLEAN, BYTEA, CHAR, DATE, DATE_TIME, DECIMAL,
    DOUBLE, FLOAT, INT, INTEGER, JSON, LONG_BLOB, LONG_TEXT, MEDIUM_BLOB, MEDIUM_INT, MEDIUM_TEXT,
    NUMBER, NUMERIC, REAL, SERIAL, SMALL_INT, TEXT, TIME, TIME_STAMP, TIME_STAMPZ, TINY_BLOB,
    TINY_INT, TINY_TEXT, UNSIGNED_BIG_INT, UNSIGNED_BIT, UNSIGNED_INT, UNSIGNED_TINY_INT, UUID,
    VARCHAR, VAR_BINARY,
};
use oxide_schema::{Column, DbType, Dialect, Filter, IdFilter, Index, Quoter, SqlValue, Table, Uri};

use crate::driver::DamengDriver;
use crate::error::Result;
use crate::reserved;

/// Quotes primary-key names in `CONSTRAINT ... PRIMARY KEY (...)`.
const PK_QUOTER: Quoter = Quoter::new('"', '"', always_reserve);

/// Dameng (DM) dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamengDialect {
    uri: Uri,
}

impl DamengDialect {
    /// Creates a dialect bound to a parsed connection descriptor.
    #[must_use]
    pub const fn new(uri: Uri) -> Self {
        Self { uri }
    }

    /// Parses `dsn` and builds the dialect from it.
    pub fn from_dsn(dsn: &str) -> Result<Self> {
        DamengDriver::parse("dm", dsn).map(Self::new)
    }

    fn write_create_table(
        &self,
        table: &Table,
        table_name: &str,
    ) -> std::result::Result<String, fmt::Error> {
        let mut sql = String::from("create table ");
        sql.write_str(&self.quote(table_name))?;
        sql.write_str(" (")?;

        for (i, col) in table.columns.iter().enumerate() {
            if i > 0 {
                sql.write_str(", ")?;
            }
            sql.write_str(&self.column_string(&bool_default(col), false))?;
        }

        if !table.primary_keys.is_empty() {
            if !table.columns.is_empty() {
                sql.write_str(", ")?;
            }
            write!(sql, "CONSTRAINT PK_{table_name} PRIMARY KEY (")?;
            PK_QUOTER.join_write(&mut sql, &table.primary_keys, ",")?;
            sql.write_char(')')?;
        }
        sql.write_char(')')?;

        Ok(sql)
    }
}

/// Name of the sequence backing an auto-increment table.
#[must_use]
pub fn seq_name(table_name: &str) -> String {
    format!("SEQ_{}", table_name.to_uppercase())
}

/// Rewrites boolean literal defaults to the `1`/`0` that `BIT` accepts.
fn bool_default(col: &Column) -> Cow<'_, Column> {
    if !col.sql_type.is_bool() || col.default_is_empty {
        return Cow::Borrowed(col);
    }
    let default = match col.default.as_str() {
        "true" => "1",
        "false" => "0",
        _ => return Cow::Borrowed(col),
    };
    let mut col = col.clone();
    col.default = default.to_string();
    Cow::Owned(col)
}

fn with_lengths(mut name: String, length: usize, length2: usize) -> String {
    if length2 > 0 {
        // Writing into a String cannot fail.
        let _ = write!(name, "({length},{length2})");
    } else if length > 0 {
        let _ = write!(name, "({length})");
    }
    name
}

impl Dialect for DamengDialect {
    fn db_type(&self) -> DbType {
        DbType::Dameng
    }

    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn sql_type(&self, col: &Column) -> String {
        let mut length = col.length;
        let name = match col.sql_type.name.as_str() {
            TINY_INT | "BYTE" => return "TINYINT".to_string(),
            SMALL_INT | MEDIUM_INT | INT | INTEGER | UNSIGNED_TINY_INT => {
                return "INTEGER".to_string();
            }
            BIG_INT | UNSIGNED_BIG_INT | UNSIGNED_BIT | UNSIGNED_INT | SERIAL | BIG_SERIAL => {
                return "BIGINT".to_string();
            }
            BIT | BOOL | BOOLEAN => return BIT.to_string(),
            UUID => {
                length = 40;
                VARCHAR
            }
            BINARY if col.length == 0 => return format!("{BINARY}(MAX)"),
            BINARY => BINARY,
            VAR_BINARY | BLOB | TINY_BLOB | MEDIUM_BLOB | LONG_BLOB | BYTEA => {
                return VAR_BINARY.to_string();
            }
            DATE => return DATE.to_string(),
            TIME if col.length > 0 => return format!("{TIME}({})", col.length),
            TIME => return TIME.to_string(),
            DATE_TIME | TIME_STAMP => TIME_STAMP,
            TIME_STAMPZ if col.length > 0 => {
                return format!("TIMESTAMP({}) WITH TIME ZONE", col.length);
            }
            TIME_STAMPZ => return "TIMESTAMP WITH TIME ZONE".to_string(),
            FLOAT => FLOAT,
            REAL | DOUBLE => REAL,
            NUMERIC | DECIMAL | NUMBER => NUMERIC,
            TEXT | JSON => return TEXT.to_string(),
            MEDIUM_TEXT | LONG_TEXT => "CLOB",
            CHAR | VARCHAR | TINY_TEXT => "VARCHAR2",
            other => other,
        };
        with_lengths(name.to_string(), length, col.length2)
    }

    fn is_reserved(&self, name: &str) -> bool {
        reserved::is_reserved(name)
    }

    fn quote(&self, name: &str) -> String {
        if name.eq_ignore_ascii_case("login") {
            format!("'{name}'")
        } else {
            format!("\"{name}\"")
        }
    }

    fn auto_incr_str(&self) -> &'static str {
        "IDENTITY"
    }

    fn supports_insert_many(&self) -> bool {
        true
    }

    fn supports_engine(&self) -> bool {
        false
    }

    fn supports_charset(&self) -> bool {
        true
    }

    fn index_on_table(&self) -> bool {
        true
    }

    fn index_check_sql(&self, table_name: &str, index_name: &str) -> (String, Vec<SqlValue>) {
        (
            "select index_name from user_indexes where table_owner = ? and table_name = ? and index_name = ?"
                .to_string(),
            vec![
                SqlValue::from(self.schema()),
                SqlValue::from(table_name),
                SqlValue::from(index_name),
            ],
        )
    }

    fn table_check_sql(&self, table_name: &str) -> (String, Vec<SqlValue>) {
        (
            "select table_name from all_tables where temporary = 'N' and table_name = ? and owner = ?"
                .to_string(),
            vec![SqlValue::from(table_name), SqlValue::from(self.schema())],
        )
    }

    fn drop_index_sql(&self, table_name: &str, index: &Index) -> String {
        let name = if index.is_regular {
            index.x_name(table_name)
        } else {
            index.name.clone()
        };
        if self.schema().is_empty() {
            return format!("DROP INDEX {}", self.quote(&name));
        }
        format!("DROP INDEX {}.{}", self.quote(self.schema()), self.quote(&name))
    }

    fn create_table_sql(&self, table: &Table, table_name: Option<&str>) -> String {
        let table_name = table_name
            .filter(|name| !name.is_empty())
            .unwrap_or(table.name.as_str());
        self.write_create_table(table, table_name).unwrap_or_default()
    }

    fn filters(&self) -> Vec<Box<dyn Filter>> {
        vec![Box::new(IdFilter)]
    }
}

#[cfg(test)]
mod tests {
    use oxide_schema::{IndexKind, SqlType};

    use super::*;

    fn dialect() -> DamengDialect {
        DamengDialect::new(Uri::for_schema(DbType::Dameng, "APP"))
    }

    fn native(name: &str, length: usize, length2: usize) -> String {
        let col = Column::new("c", SqlType::new(name)).length(length, length2);
        dialect().sql_type(&col)
    }

    #[test]
    fn integer_family() {
        assert_eq!(native(TINY_INT, 4, 0), "TINYINT");
        assert_eq!(native("BYTE", 0, 0), "TINYINT");
        assert_eq!(native(INT, 11, 0), "INTEGER");
        assert_eq!(native(MEDIUM_INT, 0, 0), "INTEGER");
        assert_eq!(native(UNSIGNED_TINY_INT, 0, 0), "INTEGER");
        assert_eq!(native(BIG_INT, 20, 0), "BIGINT");
        assert_eq!(native(SERIAL, 0, 0), "BIGINT");
        assert_eq!(native(UNSIGNED_BIT, 0, 0), "BIGINT");
        assert_eq!(native(BOOL, 1, 0), "BIT");
        assert_eq!(native(BIT, 0, 0), "BIT");
    }

    #[test]
    fn character_and_lob_types() {
        assert_eq!(native(VARCHAR, 255, 0), "VARCHAR2(255)");
        assert_eq!(native(CHAR, 0, 0), "VARCHAR2");
        assert_eq!(native(TEXT, 100, 0), "TEXT");
        assert_eq!(native(JSON, 0, 0), "TEXT");
        assert_eq!(native(LONG_TEXT, 0, 0), "CLOB");
        assert_eq!(native(UUID, 0, 0), "VARCHAR(40)");
        assert_eq!(native(UUID, 16, 0), "VARCHAR(40)");
    }

    #[test]
    fn binary_types() {
        assert_eq!(native(BINARY, 0, 0), "BINARY(MAX)");
        assert_eq!(native(BINARY, 16, 0), "BINARY(16)");
        assert_eq!(native(BLOB, 1024, 0), "VARBINARY");
        assert_eq!(native(BYTEA, 0, 0), "VARBINARY");
    }

    #[test]
    fn temporal_types() {
        assert_eq!(native(DATE, 10, 0), "DATE");
        assert_eq!(native(TIME, 0, 0), "TIME");
        assert_eq!(native(TIME, 3, 0), "TIME(3)");
        assert_eq!(native(DATE_TIME, 0, 0), "TIMESTAMP");
        assert_eq!(native(TIME_STAMP, 6, 0), "TIMESTAMP(6)");
        assert_eq!(native(TIME_STAMPZ, 0, 0), "TIMESTAMP WITH TIME ZONE");
        assert_eq!(native(TIME_STAMPZ, 6, 0), "TIMESTAMP(6) WITH TIME ZONE");
    }

    #[test]
    fn numeric_types() {
        assert_eq!(native(DECIMAL, 10, 2), "NUMERIC(10,2)");
        assert_eq!(native(NUMBER, 8, 0), "NUMERIC(8)");
        assert_eq!(native(FLOAT, 0, 0), "FLOAT");
        assert_eq!(native(DOUBLE, 0, 0), "REAL");
    }

    #[test]
    fn unknown_types_pass_through() {
        assert_eq!(native("GEOMETRY", 0, 0), "GEOMETRY");
        assert_eq!(native("INTERVAL", 2, 0), "INTERVAL(2)");
    }

    #[test]
    fn uuid_mapping_leaves_column_untouched() {
        let col = Column::new("id", SqlType::new(UUID));
        let _ = dialect().sql_type(&col);
        assert_eq!(col.length, 0);
    }

    #[test]
    fn login_uses_single_quotes() {
        let d = dialect();
        assert_eq!(d.quote("login"), "'login'");
        assert_eq!(d.quote("LOGIN"), "'LOGIN'");
        assert_eq!(d.quote("user"), "\"user\"");
        assert_eq!(d.quote("logins"), "\"logins\"");
    }

    #[test]
    fn reserved_words_ignore_case() {
        let d = dialect();
        assert!(d.is_reserved("select"));
        assert!(d.is_reserved("Table"));
        assert!(!d.is_reserved("customer_name"));
    }

    #[test]
    fn capabilities() {
        let d = dialect();
        assert_eq!(d.db_type(), DbType::Dameng);
        assert_eq!(d.auto_incr_str(), "IDENTITY");
        assert!(d.supports_insert_many());
        assert!(!d.supports_engine());
        assert!(d.supports_charset());
        assert!(d.index_on_table());
    }

    #[test]
    fn check_queries_bind_schema() {
        let d = dialect();
        let (sql, args) = d.table_check_sql("ORDERS");
        assert_eq!(
            sql,
            "select table_name from all_tables where temporary = 'N' and table_name = ? and owner = ?"
        );
        assert_eq!(args, vec![SqlValue::from("ORDERS"), SqlValue::from("APP")]);

        let (sql, args) = d.index_check_sql("ORDERS", "IDX_ORDERS_X");
        assert!(sql.starts_with("select index_name from user_indexes"));
        assert_eq!(
            args,
            vec![
                SqlValue::from("APP"),
                SqlValue::from("ORDERS"),
                SqlValue::from("IDX_ORDERS_X"),
            ]
        );
    }

    #[test]
    fn drop_index_uses_schema_and_convention_name() {
        let d = dialect();
        let regular = Index::new("by_name", IndexKind::Index);
        assert_eq!(
            d.drop_index_sql("orders", &regular),
            r#"DROP INDEX "APP"."IDX_orders_by_name""#
        );

        let custom = Index::new("my_custom_idx", IndexKind::Unique).explicit();
        assert_eq!(
            d.drop_index_sql("orders", &custom),
            r#"DROP INDEX "APP"."my_custom_idx""#
        );

        let bare = DamengDialect::new(Uri::for_schema(DbType::Dameng, ""));
        assert_eq!(
            bare.drop_index_sql("orders", &custom),
            r#"DROP INDEX "my_custom_idx""#
        );
    }

    #[test]
    fn create_table_with_primary_key() {
        let table = Table::new("users")
            .column(Column::new("id", SqlType::new(BIG_INT)).primary_key())
            .column(Column::new("name", SqlType::new(VARCHAR)).length(64, 0));
        assert_eq!(
            dialect().create_table_sql(&table, None),
            r#"create table "users" ("id" BIGINT NOT NULL, "name" VARCHAR2(64) NULL, CONSTRAINT PK_users PRIMARY KEY ("id"))"#
        );
    }

    #[test]
    fn create_table_composite_key_and_override() {
        let table = Table::new("t")
            .column(Column::new("a", SqlType::new(INT)).primary_key())
            .column(Column::new("b", SqlType::new(INT)).primary_key());
        assert_eq!(
            dialect().create_table_sql(&table, Some("t_copy")),
            r#"create table "t_copy" ("a" INTEGER NOT NULL, "b" INTEGER NOT NULL, CONSTRAINT PK_t_copy PRIMARY KEY ("a","b"))"#
        );
    }

    #[test]
    fn create_table_without_primary_key() {
        let table = Table::new("logs").column(Column::new("msg", SqlType::new(TEXT)));
        assert_eq!(
            dialect().create_table_sql(&table, Some("")),
            r#"create table "logs" ("msg" TEXT NULL)"#
        );
    }

    #[test]
    fn boolean_defaults_become_bits() {
        let table = Table::new("flags")
            .column(Column::new("on", SqlType::new(BOOL)).not_null().default("true"))
            .column(Column::new("off", SqlType::new(BOOLEAN)).default("false"))
            .column(Column::new("raw", SqlType::new(BOOL)).default("1"));
        let sql = dialect().create_table_sql(&table, None);
        assert_eq!(
            sql,
            r#"create table "flags" ("on" BIT DEFAULT 1 NOT NULL, "off" BIT DEFAULT 0 NULL, "raw" BIT DEFAULT 1 NULL)"#
        );
        assert_eq!(table.columns[0].default, "true");
    }

    #[test]
    fn column_string_with_identity() {
        let col = Column::new("id", SqlType::new(BIG_INT))
            .primary_key()
            .auto_increment();
        assert_eq!(
            dialect().column_string(&col, true),
            r#""id" BIGINT PRIMARY KEY IDENTITY NOT NULL"#
        );
    }

    #[test]
    fn id_filter_rewrites_placeholder() {
        let d = dialect();
        let table = Table::new("users").column(Column::new("uid", SqlType::new(BIG_INT)).primary_key());
        let filters = d.filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters[0].apply("SELECT * FROM users WHERE (id) = ?", &d, Some(&table)),
            r#"SELECT * FROM users WHERE "uid" = ?"#
        );
    }

    #[test]
    fn sequence_name_is_upper_case() {
        assert_eq!(seq_name("orders"), "SEQ_ORDERS");
    }
}
