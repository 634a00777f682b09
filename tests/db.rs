use constancias::db::get_connection;

mod common;

#[test]
fn test_creates_migrated_db_file() {
    let test_db = common::TestDb::new("test_connection.db");
    let conn = get_connection(test_db.pool());
    assert!(conn.is_ok());
}
