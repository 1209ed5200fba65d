use axum::extract::FromRef;

use crate::store::Store;

/// The only process-wide state: a handle to the task store.
#[derive(Clone, Debug)]
pub struct DashboardState {
    pub store: Store,
}

impl DashboardState {
    #[must_use]
    pub fn new(store: impl Into<Store>) -> Self {
        Self {
            store: store.into(),
        }
    }
}

impl FromRef<DashboardState> for Store {
    fn from_ref(state: &DashboardState) -> Self {
        state.store.clone()
    }
}
