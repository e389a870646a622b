#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use oxide_dameng::DamengDialect;
use oxide_schema::{BoxError, DbType, Queryer, Row, SqlValue, Uri, Value};

pub const SCHEMA: &str = "APP";

pub fn dialect() -> DamengDialect {
    DamengDialect::new(Uri::for_schema(DbType::Dameng, SCHEMA))
}

/// Canned answer for the first query whose SQL contains `needle`.
enum Reply {
    Rows(Vec<Result<Row, BoxError>>),
    Fail(String),
}

/// One executed query.
#[derive(Debug, Clone)]
pub struct Call {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

/// In-memory [`Queryer`] replaying canned rows.
///
/// Replies are consumed in registration order; a query without a matching
/// reply yields no rows. Open cursors are counted so tests can check that
/// every row set is released.
#[derive(Default)]
pub struct MockDb {
    replies: RefCell<Vec<(String, Reply)>>,
    calls: RefCell<Vec<Call>>,
    open: Rc<Cell<usize>>,
}

impl MockDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(self, needle: &str, rows: Vec<Vec<Value>>) -> Self {
        let rows = rows.into_iter().map(|r| Ok(Row::new(r))).collect();
        self.replies
            .borrow_mut()
            .push((needle.to_string(), Reply::Rows(rows)));
        self
    }

    /// Replies with `rows` followed by an iteration error.
    pub fn rows_then_error(self, needle: &str, rows: Vec<Vec<Value>>, err: &str) -> Self {
        let mut rows: Vec<Result<Row, BoxError>> =
            rows.into_iter().map(|r| Ok(Row::new(r))).collect();
        rows.push(Err(err.into()));
        self.replies
            .borrow_mut()
            .push((needle.to_string(), Reply::Rows(rows)));
        self
    }

    pub fn fail(self, needle: &str, err: &str) -> Self {
        self.replies
            .borrow_mut()
            .push((needle.to_string(), Reply::Fail(err.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_matching(&self, needle: &str) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.sql.contains(needle))
            .cloned()
            .collect()
    }

    pub fn open_cursors(&self) -> usize {
        self.open.get()
    }
}

pub struct MockRows {
    rows: std::vec::IntoIter<Result<Row, BoxError>>,
    open: Rc<Cell<usize>>,
}

impl Iterator for MockRows {
    type Item = Result<Row, BoxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

impl Drop for MockRows {
    fn drop(&mut self) {
        self.open.set(self.open.get() - 1);
    }
}

impl Queryer for MockDb {
    type Rows<'a>
        = MockRows
    where
        Self: 'a;

    fn query<'a>(&'a self, sql: &str, args: &[SqlValue]) -> Result<Self::Rows<'a>, BoxError> {
        self.calls.borrow_mut().push(Call {
            sql: sql.to_string(),
            args: args.to_vec(),
        });

        let reply = {
            let mut replies = self.replies.borrow_mut();
            let pos = replies
                .iter()
                .position(|(needle, _)| sql.contains(needle.as_str()));
            pos.map(|pos| replies.remove(pos).1)
        };

        let rows = match reply {
            Some(Reply::Fail(err)) => return Err(err.into()),
            Some(Reply::Rows(rows)) => rows,
            None => Vec::new(),
        };
        self.open.set(self.open.get() + 1);
        Ok(MockRows {
            rows: rows.into_iter(),
            open: Rc::clone(&self.open),
        })
    }
}

pub fn text(s: &str) -> Value {
    Value::from(s)
}

/// A row of the column metadata query.
#[allow(clippy::too_many_arguments)]
pub fn column_row(
    name: &str,
    default: Value,
    data_type: &str,
    data_length: i64,
    precision: Value,
    scale: Value,
    nullable: &str,
    comment: Value,
) -> Vec<Value> {
    vec![
        text(name),
        default,
        text(data_type),
        Value::Int(data_length),
        precision,
        scale,
        text(nullable),
        comment,
    ]
}

pub fn index_row(column: &str, uniqueness: &str, index: &str) -> Vec<Value> {
    vec![text(column), text(uniqueness), text(index)]
}
