//! Per-test databases on an embedded cluster, migrated with the shipped
//! Diesel migrations.

use coinshop::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

/// Create an empty database, apply every migration and return its URL.
///
/// `CREATE DATABASE` cannot run inside a transaction, so this goes through
/// the plain `postgres` client rather than Diesel.
pub fn provision_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("coinshop_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut client = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = cluster.connection().database_url(&name);
    run_migrations(&url).map_err(|err| format!("migrate {name}: {err}"))?;
    Ok(url)
}

/// Run raw SQL against `url`, for seeding balances directly.
pub fn execute(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}
