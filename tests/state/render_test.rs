use std::io::{self, Write};

use pretty_assertions::assert_eq;
use schemastate::metadata::ColumnDefault;
use schemastate::state::{
    ColumnState, DefaultValue, ForeignKeyState, IndexState, SchemaState, TableState,
};
use schemastate::StateError;

/// Sink that accepts `limit` bytes and then fails every write.
struct FailingWriter {
    written: Vec<u8>,
    limit: usize,
}

impl FailingWriter {
    fn new(limit: usize) -> Self {
        Self {
            written: Vec::new(),
            limit,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit - self.written.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = room.min(buf.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn orders_table() -> TableState {
    let mut table = TableState::new(0, "orders");
    table.engine = "InnoDB".to_string();
    table.collation = "utf8mb4_general_ci".to_string();
    table.comment = "customer's orders".to_string();

    table.insert_column(ColumnState::new(0, "id", "bigint").with_default(
        DefaultValue::expression("AUTO_INCREMENT"),
    ));
    table.insert_column(
        ColumnState::new(1, "user_id", "bigint")
            .nullable()
            .with_default(DefaultValue::Null),
    );
    table.insert_column(
        ColumnState::new(2, "status", "varchar(16)").with_default(DefaultValue::literal("new")),
    );
    table.insert_column(
        ColumnState::new(3, "payload", "json")
            .nullable()
            .with_default(DefaultValue::Null),
    );
    table.insert_column(
        ColumnState::new(4, "updated_at", "timestamp")
            .with_default(DefaultValue::expression("CURRENT_TIMESTAMP"))
            .with_on_update("CURRENT_TIMESTAMP")
            .with_comment("last write"),
    );

    table.insert_index(IndexState::new(0, "PRIMARY").keys(["id"]).primary());
    table.insert_index(
        IndexState::new(1, "idx_status")
            .keys(["status", "user_id"])
            .lengths([8])
            .method("BTREE"),
    );
    table.insert_foreign_key(
        ForeignKeyState::new(0, "fk_orders_user")
            .columns(["user_id"])
            .references("users", ["id"]),
    );
    table
}

#[test]
fn test_full_table() {
    let expected = concat!(
        "CREATE TABLE `orders` (\n",
        "  `id` bigint NOT NULL AUTO_INCREMENT,\n",
        "  `user_id` bigint DEFAULT NULL,\n",
        "  `status` varchar(16) NOT NULL DEFAULT 'new',\n",
        "  `payload` json,\n",
        "  `updated_at` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP COMMENT 'last write',\n",
        "  PRIMARY KEY (`id`),\n",
        "  KEY `idx_status` (`status`(8),`user_id`) USING BTREE,\n",
        "  CONSTRAINT `fk_orders_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`)\n",
        ") ENGINE=InnoDB COLLATE=utf8mb4_general_ci COMMENT 'customer''s orders';\n",
    );
    assert_eq!(orders_table().to_ddl().unwrap(), expected);
}

#[test]
fn test_columns_only_have_no_trailing_comma() {
    let mut table = TableState::new(0, "t");
    table.insert_column(ColumnState::new(0, "a", "int"));
    table.insert_column(ColumnState::new(1, "b", "int").nullable());

    assert_eq!(
        table.to_ddl().unwrap(),
        "CREATE TABLE `t` (\n  `a` int NOT NULL,\n  `b` int\n);\n"
    );
}

#[test]
fn test_separator_count_matches_member_count() {
    for (columns, indexes) in [(1, 0), (0, 2), (3, 1), (2, 3)] {
        let mut table = TableState::new(0, "t");
        for i in 0..columns {
            table.insert_column(ColumnState::new(i, format!("c{}", i), "int"));
        }
        for i in 0..indexes {
            table.insert_index(IndexState::new(i, format!("idx{}", i)).keys(["c0"]));
        }

        let ddl = table.to_ddl().unwrap();
        assert_eq!(
            ddl.matches(",\n").count(),
            columns + indexes - 1,
            "{} columns, {} indexes:\n{}",
            columns,
            indexes,
            ddl
        );
        assert!(!ddl.contains(",\n)"));
    }
}

#[test]
fn test_index_forms() {
    let mut table = TableState::new(0, "docs");
    table.insert_column(ColumnState::new(0, "id", "int"));
    table.insert_index(IndexState::new(0, "PRIMARY").keys(["id"]).primary());
    table.insert_index(
        IndexState::new(1, "idx1")
            .keys(["name"])
            .lengths([10])
            .method("BTREE"),
    );
    table.insert_index(IndexState::new(2, "ft_body").keys(["body"]).method("FULLTEXT"));
    table.insert_index(
        IndexState::new(3, "uk_slug")
            .keys(["slug"])
            .unique()
            .with_comment("one per doc"),
    );

    let ddl = table.to_ddl().unwrap();
    assert!(ddl.contains("  PRIMARY KEY (`id`),\n"));
    assert!(ddl.contains("  KEY `idx1` (`name`(10)) USING BTREE,\n"));
    assert!(ddl.contains("  FULLTEXT KEY `ft_body` (`body`),\n"));
    assert!(ddl.contains("  UNIQUE KEY `uk_slug` (`slug`) COMMENT 'one per doc'\n"));
}

#[test]
fn test_identifiers_are_escaped() {
    let mut table = TableState::new(0, "odd`name");
    table.insert_column(ColumnState::new(0, "col`1", "int"));

    assert_eq!(
        table.to_ddl().unwrap(),
        "CREATE TABLE `odd``name` (\n  `col``1` int NOT NULL\n);\n"
    );
}

#[test]
fn test_output_is_stable_across_renders() {
    let table = orders_table();
    let first = table.to_ddl().unwrap();
    for _ in 0..10 {
        assert_eq!(table.to_ddl().unwrap(), first);
    }
}

#[test]
fn test_sink_failure_is_reported() {
    let table = orders_table();
    let full = table.to_ddl().unwrap();

    for limit in [0, 5, 40, full.len() - 1] {
        let mut sink = FailingWriter::new(limit);
        let err = table.write_ddl(&mut sink).unwrap_err();

        assert!(matches!(err, StateError::Write(_)), "limit {}: {:?}", limit, err);
        assert!(err.is_write_failure());
        assert_eq!(sink.written, full.as_bytes()[..limit].to_vec());
    }
}

#[test]
fn test_sink_with_room_succeeds() {
    let table = orders_table();
    let full = table.to_ddl().unwrap();

    let mut sink = FailingWriter::new(full.len());
    table.write_ddl(&mut sink).unwrap();
    assert_eq!(String::from_utf8(sink.written).unwrap(), full);
}

#[test]
fn test_schema_tables_are_separated_by_blank_line() {
    let mut schema = SchemaState::new(0, "");
    schema.add_table("b").add_column("x", "int");
    schema.add_table("a").add_column("y", "int");

    let mut buf = Vec::new();
    schema.write_ddl(&mut buf).unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        concat!(
            "CREATE TABLE `b` (\n  `x` int NOT NULL\n);\n",
            "\n",
            "CREATE TABLE `a` (\n  `y` int NOT NULL\n);\n",
        )
    );
}

#[test]
fn test_nullable_text_without_default_renders_no_default() {
    let mut table = TableState::new(0, "notes");
    table.insert_column(ColumnState::new(0, "body", "TEXT").nullable());

    let expected = "CREATE TABLE `notes` (\n  `body` TEXT\n);\n";
    assert_eq!(table.to_ddl().unwrap(), expected);

    // Emission back-fills an explicit null default; it must stay suppressed.
    let doc = table.to_metadata();
    assert_eq!(doc.columns[0].default_value, Some(ColumnDefault::DefaultNull));
    let reloaded = TableState::from(&doc);
    assert_eq!(reloaded.to_ddl().unwrap(), expected);
}
