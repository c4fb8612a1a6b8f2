use crate::db::models::{DbItem, ItemCreate};
use crate::db::schema::{SQLITE_DROP, SQLITE_INIT};
use crate::error::LabError;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, SqlitePool};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert an item in its own transaction and return the stored row.
    CreateItem(ItemCreate, RpcReplyPort<Result<DbItem, LabError>>),

    /// List every item ordered by id.
    ListItems(RpcReplyPort<Result<Vec<DbItem>, LabError>>),

    /// Drop and recreate the `item` table.
    ResetItems(RpcReplyPort<Result<(), LabError>>),
}

/// Startup arguments of the database actor.
#[derive(Debug, Clone)]
pub struct DbArgs {
    pub database_url: String,
    /// Log each executed statement.
    pub echo: bool,
    /// Drop the table before creating it.
    pub reset: bool,
}

impl DbArgs {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            echo: false,
            reset: false,
        }
    }
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create_item(&self, create: ItemCreate) -> Result<DbItem, LabError> {
        ractor::call!(self.actor, DbActorMessage::CreateItem, create)
            .map_err(|e| LabError::Ractor(format!("DbActor CreateItem RPC failed: {e}")))?
    }

    pub async fn list_items(&self) -> Result<Vec<DbItem>, LabError> {
        ractor::call!(self.actor, DbActorMessage::ListItems)
            .map_err(|e| LabError::Ractor(format!("DbActor ListItems RPC failed: {e}")))?
    }

    pub async fn reset_items(&self) -> Result<(), LabError> {
        ractor::call!(self.actor, DbActorMessage::ResetItems)
            .map_err(|e| LabError::Ractor(format!("DbActor ResetItems RPC failed: {e}")))?
    }

    /// Stop the actor and wait until the pool has been closed.
    pub async fn shutdown(self) -> Result<(), LabError> {
        self.actor
            .stop_and_wait(Some("shutdown".to_string()), Some(Duration::from_secs(10)))
            .await
            .map_err(|e| LabError::Ractor(format!("DbActor stop failed: {e}")))
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = DbArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let mut connect_opts = SqliteConnectOptions::from_str(args.database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
        if !args.echo {
            connect_opts = connect_opts.disable_statement_logging();
        }

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        if args.reset {
            run_script(&pool, SQLITE_DROP)
                .await
                .map_err(|e| ActorProcessingErr::from(format!("db reset failed: {e}")))?;
            info!("item table dropped on startup");
        }

        run_script(&pool, SQLITE_INIT)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped, pool closed");
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::CreateItem(create, reply) => {
                let res = self.create_item(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListItems(reply) => {
                let res = self.list_items(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ResetItems(reply) => {
                let res = async {
                    run_script(&state.pool, SQLITE_DROP).await?;
                    run_script(&state.pool, SQLITE_INIT).await
                }
                .await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    /// Insert, commit, then re-read the committed row.
    async fn create_item(&self, pool: &SqlitePool, create: ItemCreate) -> Result<DbItem, LabError> {
        let mut tx = pool.begin().await?;
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO item (name, price, is_offered)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(create.name)
        .bind(create.price)
        .bind(create.is_offered)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        let row = sqlx::query_as::<_, DbItem>(
            r#"
        SELECT id, name, price, is_offered
        FROM item
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        debug!(id, name = %row.name, "item inserted");
        Ok(row)
    }

    async fn list_items(&self, pool: &SqlitePool) -> Result<Vec<DbItem>, LabError> {
        let rows = sqlx::query_as::<_, DbItem>(
            r#"
        SELECT id, name, price, is_offered
        FROM item
        ORDER BY id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The actor is unnamed so several labs (or tests) can run one side by side.
pub async fn spawn(args: DbArgs) -> Result<DbActorHandle, LabError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, args)
        .await
        .map_err(|e| LabError::Ractor(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn run_script(pool: &SqlitePool, script: &str) -> Result<(), LabError> {
    for stmt in script.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
