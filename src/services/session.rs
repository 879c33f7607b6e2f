//! Session bootstrap: the two initial loads.
//!
//! DESIGN
//! ======
//! The boundary and the point list are fetched concurrently. Each branch
//! applies its own result to the shared core as soon as it resolves, so the
//! map masks itself before the points arrive (or the other way round) and
//! neither load waits on the other.
//!
//! ERROR HANDLING
//! ==============
//! A failed load is logged and marks that input settled. The core keeps its
//! default for it: no boundary means an unmasked map, no points means an
//! empty store. Neither is fatal.

use std::sync::Arc;

use mapcore::engine::EditorCore;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::sources::{BoundarySource, PointSource};
use crate::state::AppState;

/// Run both initial loads to completion against `core`.
pub async fn run_initial_loads(
    core: Arc<RwLock<EditorCore>>,
    boundary: Arc<dyn BoundarySource>,
    points: Arc<dyn PointSource>,
) {
    let boundary_branch = async {
        match boundary.load_boundary().await {
            Ok(polygon) => {
                let actions = core.write().await.load_boundary(polygon);
                for action in actions {
                    debug!(?action, "boundary applied");
                }
            }
            Err(e) => {
                error!(error = %e, "boundary load failed");
                core.write().await.boundary_failed();
            }
        }
    };

    let points_branch = async {
        match points.load_points().await {
            Ok(list) => {
                let action = core.write().await.load_points(list);
                debug!(?action, "points applied");
            }
            Err(e) => {
                error!(error = %e, "points load failed");
                core.write().await.points_failed();
            }
        }
    };

    tokio::join!(boundary_branch, points_branch);
}

/// Spawn the initial loads so the server can accept requests meanwhile.
pub fn spawn_initial_loads(
    state: AppState,
    boundary: Arc<dyn BoundarySource>,
    points: Arc<dyn PointSource>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_initial_loads(state.core, boundary, points).await;
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
