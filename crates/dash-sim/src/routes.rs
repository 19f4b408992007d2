use dash_proto::route::{FlightRoute, RouteStatus};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),
    #[error("duplicate route id: {0}")]
    Duplicate(String),
    #[error("route {0} has no waypoints")]
    NoWaypoints(String),
    #[error("route {id}: cannot go from {from:?} to {to:?}")]
    InvalidTransition { id: String, from: RouteStatus, to: RouteStatus },
}

/// Ordered in-memory route list with an optional selection.
///
/// Activation does not demote other active routes; callers that want a
/// single active route check [`RouteRegistry::active_count`].
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Vec<FlightRoute>,
    selected: Option<String>,
}

impl RouteRegistry {
    pub fn new(routes: Vec<FlightRoute>) -> Self {
        Self { routes, selected: None }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlightRoute> {
        self.routes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&FlightRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.routes.iter().filter(|r| r.status == RouteStatus::Active).count()
    }

    pub fn insert(&mut self, route: FlightRoute) -> Result<(), RouteError> {
        if route.waypoints.is_empty() {
            return Err(RouteError::NoWaypoints(route.id));
        }
        if self.get(&route.id).is_some() {
            return Err(RouteError::Duplicate(route.id));
        }
        info!("routes: added {} ({} waypoints)", route.id, route.waypoints.len());
        self.routes.push(route);
        Ok(())
    }

    pub fn selected(&self) -> Option<&FlightRoute> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn select(&mut self, id: &str) -> Result<&FlightRoute, RouteError> {
        let idx = self.index_of(id)?;
        self.selected = Some(id.to_string());
        Ok(&self.routes[idx])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Marks `id` active and selects it. Other routes keep their status.
    pub fn activate(&mut self, id: &str) -> Result<&FlightRoute, RouteError> {
        let idx = self.index_of(id)?;
        self.routes[idx].status = RouteStatus::Active;
        self.selected = Some(id.to_string());
        if self.active_count() > 1 {
            warn!("routes: {} activated while {} routes are active", id, self.active_count());
        } else {
            info!("routes: {} activated", id);
        }
        Ok(&self.routes[idx])
    }

    pub fn complete(&mut self, id: &str) -> Result<&FlightRoute, RouteError> {
        self.transition(id, RouteStatus::Completed, |s| s == RouteStatus::Active)
    }

    pub fn cancel(&mut self, id: &str) -> Result<&FlightRoute, RouteError> {
        self.transition(id, RouteStatus::Cancelled, |s| {
            matches!(s, RouteStatus::Planned | RouteStatus::Active)
        })
    }

    /// Removes `id`; the selection is cleared only if it pointed at `id`.
    pub fn delete(&mut self, id: &str) -> Result<FlightRoute, RouteError> {
        let idx = self.index_of(id)?;
        let route = self.routes.remove(idx);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        info!("routes: deleted {}", id);
        Ok(route)
    }

    fn transition(
        &mut self,
        id: &str,
        to: RouteStatus,
        allowed_from: impl Fn(RouteStatus) -> bool,
    ) -> Result<&FlightRoute, RouteError> {
        let idx = self.index_of(id)?;
        let from = self.routes[idx].status;
        if !allowed_from(from) {
            return Err(RouteError::InvalidTransition { id: id.to_string(), from, to });
        }
        self.routes[idx].status = to;
        info!("routes: {} {} -> {}", id, from.label(), to.label());
        Ok(&self.routes[idx])
    }

    fn index_of(&self, id: &str) -> Result<usize, RouteError> {
        self.routes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RouteError::Unknown(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::seed;

    use super::*;

    fn registry() -> RouteRegistry {
        RouteRegistry::new(seed::routes())
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut reg = registry();
        reg.select("route-002").unwrap();

        let removed = reg.delete("route-002").unwrap();
        assert_eq!(removed.id, "route-002");
        assert!(reg.selected().is_none());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut reg = registry();
        reg.select("route-002").unwrap();

        reg.delete("route-003").unwrap();
        assert_eq!(reg.selected().map(|r| r.id.as_str()), Some("route-002"));

        reg.clear_selection();
        assert!(reg.selected().is_none());
    }

    #[test]
    fn test_delete_unknown() {
        let mut reg = registry();
        assert_eq!(reg.delete("route-999"), Err(RouteError::Unknown("route-999".into())));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_activate_selects_without_mutual_exclusion() {
        let mut reg = registry();
        assert_eq!(reg.active_count(), 1);

        let r = reg.activate("route-002").unwrap();
        assert_eq!(r.status, RouteStatus::Active);
        assert_eq!(reg.selected().unwrap().id, "route-002");
        assert_eq!(reg.get("route-001").unwrap().status, RouteStatus::Active);
        assert_eq!(reg.get("route-003").unwrap().status, RouteStatus::Completed);
        assert_eq!(reg.active_count(), 2);
    }

    #[test]
    fn test_selection_tracks_status_changes() {
        let mut reg = registry();
        reg.select("route-001").unwrap();
        reg.complete("route-001").unwrap();
        assert_eq!(reg.selected().unwrap().status, RouteStatus::Completed);
    }

    #[test]
    fn test_transitions() {
        let mut reg = registry();

        assert_eq!(
            reg.complete("route-002").unwrap_err(),
            RouteError::InvalidTransition {
                id: "route-002".into(),
                from: RouteStatus::Planned,
                to: RouteStatus::Completed,
            }
        );
        assert_eq!(reg.cancel("route-002").unwrap().status, RouteStatus::Cancelled);
        assert!(reg.cancel("route-003").is_err());
        assert_eq!(reg.complete("route-001").unwrap().status, RouteStatus::Completed);

        // completed routes can be flown again
        assert_eq!(reg.activate("route-003").unwrap().status, RouteStatus::Active);
    }

    #[test]
    fn test_insert_validates() {
        let mut reg = registry();
        let mut r = seed::routes().remove(0);
        assert_eq!(reg.insert(r.clone()), Err(RouteError::Duplicate("route-001".into())));

        r.id = "route-004".into();
        r.waypoints.clear();
        assert_eq!(reg.insert(r.clone()), Err(RouteError::NoWaypoints("route-004".into())));

        r.waypoints = seed::routes()[1].waypoints.clone();
        reg.insert(r).unwrap();
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.iter().last().unwrap().id, "route-004");
    }
}
