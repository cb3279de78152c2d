use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_gax::conn::Environment;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert_or_update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::future::Future;
use std::sync::Arc;

use super::ItemRepository;
use crate::config::SpannerConfig;
use crate::models::Item;

const TABLE: &str = "items";

/// Spanner-backed item store
///
/// Each item is kept as a JSON document in the `items` table, keyed by its
/// id. The client is cheap to clone and shared across handlers.
#[derive(Clone)]
pub struct SpannerItemRepository {
    inner: Arc<Client>,
}

impl SpannerItemRepository {
    /// Connect to the configured database.
    ///
    /// The instance, database and `items` table are created first when they
    /// don't exist yet, so a fresh emulator needs no manual setup.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        let client_config = match &config.emulator_host {
            Some(host) => {
                tracing::info!("Connecting to Spanner emulator at: {}", host);
                ClientConfig {
                    environment: Environment::Emulator(host.clone()),
                    ..Default::default()
                }
            }
            None => {
                tracing::info!("Connecting to production Spanner");
                ClientConfig::default()
            }
        };

        let client = Client::new(&database_path, client_config)
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    async fn query_items(&self, statement: Statement) -> Result<Vec<Item>> {
        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query items from Spanner")?;

        let mut items = Vec::new();
        while let Some(row) = result_set.next().await? {
            items.push(item_from_row(&row)?);
        }
        Ok(items)
    }
}

fn item_from_row(row: &Row) -> Result<Item> {
    let data: String = row.column_by_name("data")?;
    serde_json::from_str(&data).context("Failed to deserialize item document")
}

#[async_trait]
impl ItemRepository for SpannerItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>> {
        let statement = Statement::new("SELECT data FROM items ORDER BY id ASC");
        let items = self.query_items(statement).await?;

        tracing::debug!("Listed {} items", items.len());
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Item>> {
        let mut statement = Statement::new("SELECT data FROM items WHERE id = @id");
        statement.add_param("id", &i64::from(id));

        let item = self.query_items(statement).await?.into_iter().next();
        match &item {
            Some(_) => tracing::debug!("Read item with id: {}", id),
            None => tracing::debug!("Item not found with id: {}", id),
        }
        Ok(item)
    }

    async fn save(&self, item: Item) -> Result<Item> {
        let data = serde_json::to_string(&item)
            .context("Failed to serialize item document")?;

        let mutation = insert_or_update(
            TABLE,
            &["id", "data", "updated_at"],
            &[&i64::from(item.id), &data, &CommitTimestamp::new()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to save item to Spanner")?;

        tracing::debug!("Saved item with id: {}", item.id);
        Ok(item)
    }

    async fn delete(&self, item: &Item) -> Result<()> {
        let mutation = delete(TABLE, Key::new(&i64::from(item.id)));

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to delete item from Spanner")?;

        tracing::debug!("Deleted item with id: {}", item.id);
        Ok(())
    }

    /// Runs `SELECT 1` to verify the connection is alive
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

/// Create the Spanner instance, database and table when missing
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_config = match &config.emulator_host {
        Some(host) => AdminClientConfig {
            environment: Environment::Emulator(host.clone()),
            ..Default::default()
        },
        None => AdminClientConfig::default(),
    };

    let admin = AdminClient::new(admin_config)
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    let instance_lookup = admin
        .instance()
        .get_instance(
            GetInstanceRequest {
                name: instance_path.clone(),
                field_mask: None,
            },
            None,
        )
        .await;
    provision_if_missing("instance", &instance_path, instance_lookup, || {
        create_instance(&admin, config, &project_path, &instance_path)
    })
    .await?;

    let database_lookup = admin
        .database()
        .get_database(
            GetDatabaseRequest {
                name: database_path.clone(),
            },
            None,
        )
        .await;
    provision_if_missing("database", &database_path, database_lookup, || {
        create_database(&admin, config, &instance_path)
    })
    .await?;

    ensure_items_table(&admin, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// Run `create` only when `lookup` failed with NOT_FOUND
async fn provision_if_missing<T, F, Fut>(
    kind: &str,
    path: &str,
    lookup: std::result::Result<T, Status>,
    create: F,
) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    match lookup {
        Ok(_) => {
            tracing::info!("Spanner {} already exists: {}", kind, path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Spanner {} not found, creating: {}", kind, path);
            create().await?;
            tracing::info!("Spanner {} created: {}", kind, path);
            Ok(())
        }
        Err(status) => Err(anyhow::anyhow!(
            "Failed to check {} existence: {}",
            kind,
            status.message()
        )),
    }
}

async fn create_instance(
    admin: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let instance_config = match config.emulator_host {
        Some(_) => "emulator-config",
        None => "regional-us-central1",
    };

    let request = CreateInstanceRequest {
        parent: project_path.to_string(),
        instance_id: config.instance.clone(),
        instance: Some(Instance {
            name: instance_path.to_string(),
            config: format!("{}/instanceConfigs/{}", project_path, instance_config),
            display_name: format!("{} instance", config.instance),
            node_count: 1,
            ..Default::default()
        }),
    };

    admin
        .instance()
        .create_instance(request, None)
        .await
        .context("Failed to start instance creation")?
        .wait(None)
        .await
        .context("Failed to create instance")?;
    Ok(())
}

async fn create_database(
    admin: &AdminClient,
    config: &SpannerConfig,
    instance_path: &str,
) -> Result<()> {
    let request = CreateDatabaseRequest {
        parent: instance_path.to_string(),
        create_statement: format!("CREATE DATABASE `{}`", config.database),
        extra_statements: vec![],
        encryption_config: None,
        database_dialect: 1, // GoogleSQL
        proto_descriptors: vec![],
    };

    admin
        .database()
        .create_database(request, None)
        .await
        .context("Failed to start database creation")?
        .wait(None)
        .await
        .context("Failed to create database")?;
    Ok(())
}

const ITEMS_TABLE_DDL: &str = "CREATE TABLE items (\
    id INT64 NOT NULL, \
    data JSON NOT NULL, \
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true)\
) PRIMARY KEY (id)";

fn has_items_table(statements: &[String]) -> bool {
    statements
        .iter()
        .any(|stmt| stmt.contains("CREATE TABLE items") || stmt.contains("CREATE TABLE `items`"))
}

async fn ensure_items_table(admin: &AdminClient, database_path: &str) -> Result<()> {
    let ddl = admin
        .database()
        .get_database_ddl(
            GetDatabaseDdlRequest {
                database: database_path.to_string(),
            },
            None,
        )
        .await
        .context("Failed to get database DDL")?
        .into_inner();

    if has_items_table(&ddl.statements) {
        tracing::info!("Table '{}' already exists", TABLE);
        return Ok(());
    }

    let request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![ITEMS_TABLE_DDL.to_string()],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    admin
        .database()
        .update_database_ddl(request, None)
        .await
        .context("Failed to start table creation")?
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created", TABLE);
    Ok(())
}
