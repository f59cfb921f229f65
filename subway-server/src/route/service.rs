//! Route query orchestration.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Station, StationId};
use crate::store::SubwayStore;

use super::{FareCalculator, NetworkGraph, RouteError, order_stations};

/// Answer to a route query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Stations from source to target, in travel order.
    pub stations: Vec<Station>,

    /// Total distance travelled.
    pub distance: u64,

    /// Fare payable for the trip.
    pub fare: u64,
}

/// Finds the shortest route between two stations and prices it.
///
/// Borrows its collaborators for the duration of one query; the graph is
/// rebuilt from the store on every call.
pub struct RouteService<'a, S: SubwayStore> {
    store: &'a S,
    fares: &'a FareCalculator,
}

impl<'a, S: SubwayStore> RouteService<'a, S> {
    pub fn new(store: &'a S, fares: &'a FareCalculator) -> Self {
        Self { store, fares }
    }

    /// Shortest route from `source` to `target` at the full adult fare.
    pub fn find_route(&self, source: StationId, target: StationId) -> Result<Route, RouteError> {
        self.find_route_for(source, target, None)
    }

    /// Shortest route from `source` to `target`, discounted for `age` if given.
    ///
    /// The fare includes the largest surcharge among the lines ridden.
    pub fn find_route_for(
        &self,
        source: StationId,
        target: StationId,
        age: Option<u32>,
    ) -> Result<Route, RouteError> {
        if source == target {
            return Err(RouteError::SameStation(source));
        }

        let segments = self.store.all_segments()?;
        let graph = NetworkGraph::build(&segments);
        let path = graph.shortest_path(source, target)?;

        let records = self.store.stations_by_ids(&path.stations)?;
        let stations = order_stations(&path.stations, records)?;

        let surcharge = if path.lines.is_empty() {
            0
        } else {
            let extra: HashMap<_, _> = self
                .store
                .all_lines()?
                .into_iter()
                .map(|l| (l.id, l.extra_fare()))
                .collect();
            path.lines
                .iter()
                .filter_map(|line| extra.get(line))
                .copied()
                .max()
                .unwrap_or(0)
        };

        let fare = self.fares.route_fare(path.distance, surcharge, age)?;

        debug!(
            %source,
            %target,
            distance = path.distance,
            surcharge,
            fare,
            stations = stations.len(),
            "route found"
        );

        Ok(Route {
            stations,
            distance: path.distance,
            fare,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Distance, Hop, LineDraft, StationName};
    use crate::route::FareError;
    use crate::store::MemoryStore;

    struct Network {
        store: MemoryStore,
        ids: Vec<StationId>,
    }

    fn network(names: &[&str]) -> Network {
        let store = MemoryStore::new();
        let ids = names
            .iter()
            .map(|n| store.create_station(StationName::parse(n).unwrap()).unwrap().id)
            .collect();
        Network { store, ids }
    }

    impl Network {
        fn line(&self, name: &str, extra_fare: u64, hops: &[(usize, usize, i64)]) {
            let hops: Vec<Hop> = hops
                .iter()
                .map(|&(u, d, dist)| {
                    Hop::new(self.ids[u], self.ids[d], Distance::new(dist).unwrap()).unwrap()
                })
                .collect();
            self.store
                .create_line(LineDraft::new(name, "bg-blue-600", extra_fare).unwrap(), &hops)
                .unwrap();
        }
    }

    fn names(route: &Route) -> Vec<&str> {
        route.stations.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn picks_direct_line_over_detour() {
        let net = network(&["A", "B", "C"]);
        net.line("Line 1", 0, &[(0, 1, 4), (1, 2, 5)]);
        net.line("Line 2", 0, &[(0, 2, 3)]);

        let fares = FareCalculator::default();
        let route = RouteService::new(&net.store, &fares)
            .find_route(net.ids[0], net.ids[2])
            .unwrap();

        assert_eq!(names(&route), vec!["A", "C"]);
        assert_eq!(route.distance, 3);
        assert_eq!(route.fare, 1250);
    }

    #[test]
    fn crosses_lines_in_travel_order() {
        let net = network(&["Gangnam", "Yeoksam", "Seolleung", "Samseong"]);
        net.line("Line 2", 0, &[(0, 1, 6), (1, 2, 6)]);
        net.line("Bundang", 0, &[(3, 2, 8)]);

        let fares = FareCalculator::default();
        let route = RouteService::new(&net.store, &fares)
            .find_route(net.ids[3], net.ids[0])
            .unwrap();

        assert_eq!(names(&route), vec!["Samseong", "Seolleung", "Yeoksam", "Gangnam"]);
        assert_eq!(route.distance, 20);
        assert_eq!(route.fare, 1450);
    }

    #[test]
    fn applies_highest_surcharge_on_route() {
        let net = network(&["A", "B", "C"]);
        net.line("Cheap", 100, &[(0, 1, 5)]);
        net.line("Dear", 900, &[(1, 2, 5)]);

        let fares = FareCalculator::default();
        let service = RouteService::new(&net.store, &fares);
        assert_eq!(service.find_route(net.ids[0], net.ids[1]).unwrap().fare, 1350);
        assert_eq!(service.find_route(net.ids[0], net.ids[2]).unwrap().fare, 2150);
    }

    #[test]
    fn applies_age_discount() {
        let net = network(&["A", "B"]);
        net.line("Line 1", 0, &[(0, 1, 5)]);

        let fares = FareCalculator::default();
        let service = RouteService::new(&net.store, &fares);
        let route = service.find_route_for(net.ids[0], net.ids[1], Some(8)).unwrap();
        assert_eq!(route.fare, 450);
    }

    #[test]
    fn unbounded_surcharge_reports_overflow() {
        let net = network(&["A", "B"]);
        let draft = LineDraft {
            extra_fare: u64::MAX,
            ..LineDraft::new("Line 1", "bg-blue-600", 0).unwrap()
        };
        let hop = Hop::new(net.ids[0], net.ids[1], Distance::new(5).unwrap()).unwrap();
        net.store.create_line(draft, &[hop]).unwrap();

        let fares = FareCalculator::default();
        let service = RouteService::new(&net.store, &fares);
        assert_eq!(
            service.find_route(net.ids[0], net.ids[1]),
            Err(RouteError::Fare(FareError::Overflow))
        );
        assert_eq!(
            service.find_route_for(net.ids[0], net.ids[1], Some(15)),
            Err(RouteError::Fare(FareError::Overflow))
        );
    }

    #[test]
    fn propagates_graph_errors() {
        let net = network(&["A", "B", "C", "D", "Z"]);
        net.line("Line 1", 0, &[(0, 1, 4)]);
        net.line("Line 2", 0, &[(2, 3, 5)]);

        let fares = FareCalculator::default();
        let service = RouteService::new(&net.store, &fares);

        assert_eq!(
            service.find_route(net.ids[0], net.ids[0]),
            Err(RouteError::SameStation(net.ids[0]))
        );
        assert_eq!(
            service.find_route(net.ids[0], net.ids[4]),
            Err(RouteError::StationNotFound(net.ids[4]))
        );
        assert_eq!(
            service.find_route(net.ids[0], net.ids[3]),
            Err(RouteError::NoPath {
                from: net.ids[0],
                to: net.ids[3]
            })
        );
    }
}
