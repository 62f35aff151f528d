//! Application state shared across handlers.

use crate::chat::gateway::GatewayConfig;
use crate::db::DbPool;
use crate::revision::RevisionSchedule;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  pub db: DbPool,
  pub schedule: RevisionSchedule,
  pub gateway: GatewayConfig,
}

impl AppState {
  pub fn new(db: DbPool, schedule: RevisionSchedule, gateway: GatewayConfig) -> Self {
    Self {
      db,
      schedule,
      gateway,
    }
  }
}
