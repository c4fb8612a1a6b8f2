//! Startup and shutdown of the selected lab.

use crate::config::{Config, Lab};
use crate::db::{self, DbActorHandle, DbArgs};
use crate::error::LabError;
use crate::server::router::{cors_for_origins, lab_router};
use crate::server::routes::{
    hello,
    items::{self, ItemsState},
    orders::{self, OrdersState},
    todos::{self, TodosState},
    uploads::{self, UploadsState},
};
use axum::Router;
use tracing::info;

/// A lab ready to serve, plus whatever it must release on shutdown.
pub struct LabApp {
    pub lab: Lab,
    pub router: Router,
    db: Option<DbActorHandle>,
}

impl LabApp {
    /// Runs the lab's startup hook and builds its router.
    pub async fn start(cfg: &Config) -> Result<Self, LabError> {
        let lab = cfg.basic.lab;
        let mut db = None;

        let routes = match lab {
            Lab::Hello => hello::router(cors_for_origins(&cfg.cors.allow_origins)),
            Lab::Orders => orders::router(OrdersState::seeded()),
            Lab::Todos => todos::router(TodosState::seeded()),
            Lab::Uploads => uploads::router(UploadsState::new(cfg.uploads.clone())),
            Lab::Items => {
                let handle = db::spawn(DbArgs {
                    database_url: cfg.items.database_url.clone(),
                    echo: cfg.items.echo,
                    reset: cfg.items.reset_on_startup,
                })
                .await?;
                db = Some(handle.clone());
                items::router(ItemsState { db: handle })
            }
        };

        info!(lab = %lab, "lab started");
        Ok(Self {
            lab,
            router: lab_router(routes),
            db,
        })
    }

    /// Runs the lab's shutdown hook. Safe to call for labs without resources.
    pub async fn shutdown(self) -> Result<(), LabError> {
        if let Some(db) = self.db {
            db.shutdown().await?;
        }
        info!(lab = %self.lab, "lab stopped");
        Ok(())
    }
}
