use std::{
    collections::HashMap,
    fmt::{self, Display},
};

use crate::Error;

pub type Cost = u32;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    name: String,
}

impl Location {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: Vec<Location>,
    cost: Cost,
}

impl Route {
    /// Locations from origin to destination, both inclusive.
    pub fn path(&self) -> &[Location] {
        &self.path
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn origin(&self) -> &Location {
        &self.path[0]
    }

    pub fn destination(&self) -> &Location {
        &self.path[self.path.len() - 1]
    }
}

/// Undirected travel map over a fixed set of locations.
///
/// Costs are kept in a dense, symmetric matrix, `None` means there's no direct
/// connection. Location indices follow the order given to [`RoutePlanner::new`].
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    locations: Vec<Location>,
    indices: HashMap<String, usize>,
    costs: Vec<Option<Cost>>, // costs[from * n + to]
}

impl RoutePlanner {
    pub fn new<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locations = Vec::new();
        let mut indices = HashMap::new();
        for name in names {
            let name = name.as_ref();
            if indices.insert(name.to_string(), locations.len()).is_some() {
                return Err(Error::DuplicateLocation(name.to_string()));
            }
            locations.push(Location::new(name));
        }

        let n = locations.len();
        let mut costs = vec![None; n * n];
        for ind in 0..n {
            costs[ind * n + ind] = Some(0);
        }

        Ok(Self {
            locations,
            indices,
            costs,
        })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Connects two locations in both directions, replacing any earlier cost.
    ///
    /// Nothing changes if an error is returned.
    pub fn connect(&mut self, from: &str, to: &str, cost: Cost) -> Result<(), Error> {
        let from_ind = self.index_of(from)?;
        let to_ind = self.index_of(to)?;
        if from_ind == to_ind {
            return Err(Error::SelfConnection(from.to_string()));
        }

        let n = self.len();
        self.costs[from_ind * n + to_ind] = Some(cost);
        self.costs[to_ind * n + from_ind] = Some(cost);

        Ok(())
    }

    /// Direct travel cost between two locations, `None` if they aren't connected.
    pub fn cost(&self, from: &str, to: &str) -> Result<Option<Cost>, Error> {
        let from_ind = self.index_of(from)?;
        let to_ind = self.index_of(to)?;

        Ok(self.cost_at(from_ind, to_ind))
    }

    pub fn neighbors(&self, name: &str) -> Result<Vec<(&Location, Cost)>, Error> {
        let ind = self.index_of(name)?;

        Ok(self.neighbors_at(ind).collect())
    }

    /// Dijkstra over the cost matrix, picking the next location by a linear scan.
    ///
    /// Ties are broken by the lower location index.
    pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<Route, Error> {
        let origin_ind = self.index_of(origin)?;
        let dest_ind = self.index_of(destination)?;

        let n = self.len();
        let mut min_dists: Vec<Option<Cost>> = vec![None; n];
        let mut parents: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        min_dists[origin_ind] = Some(0);

        for _ in 1..n {
            let Some((cur_ind, cur_dist)) = Self::closest_unvisited(&min_dists, &visited) else {
                break;
            };
            visited[cur_ind] = true;

            for neighbor_ind in 0..n {
                if visited[neighbor_ind] {
                    continue;
                }
                let Some(edge_cost) = self.cost_at(cur_ind, neighbor_ind) else {
                    continue;
                };
                // Overflowing sums can't be shorter than anything representable.
                let Some(next_dist) = cur_dist.checked_add(edge_cost) else {
                    continue;
                };
                if min_dists[neighbor_ind].map_or(true, |dist| next_dist < dist) {
                    min_dists[neighbor_ind] = Some(next_dist);
                    parents[neighbor_ind] = Some(cur_ind);
                }
            }
        }

        let Some(cost) = min_dists[dest_ind] else {
            return Err(Error::Unreachable {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        };

        let mut path = vec![self.locations[dest_ind].clone()];
        let mut cur_ind = dest_ind;
        while let Some(parent_ind) = parents[cur_ind] {
            path.push(self.locations[parent_ind].clone());
            cur_ind = parent_ind;
        }
        debug_assert_eq!(cur_ind, origin_ind);
        path.reverse();

        Ok(Route { path, cost })
    }

    fn index_of(&self, name: &str) -> Result<usize, Error> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| Error::LocationNotFound(name.to_string()))
    }

    fn cost_at(&self, from_ind: usize, to_ind: usize) -> Option<Cost> {
        self.costs[from_ind * self.len() + to_ind]
    }

    fn neighbors_at(&self, ind: usize) -> impl Iterator<Item = (&Location, Cost)> + '_ {
        self.locations
            .iter()
            .enumerate()
            .filter(move |(other_ind, _)| *other_ind != ind)
            .filter_map(move |(other_ind, loc)| self.cost_at(ind, other_ind).map(|cost| (loc, cost)))
    }

    fn closest_unvisited(min_dists: &[Option<Cost>], visited: &[bool]) -> Option<(usize, Cost)> {
        let mut closest: Option<(usize, Cost)> = None;
        for (ind, dist) in min_dists.iter().enumerate() {
            if visited[ind] {
                continue;
            }
            if let Some(dist) = *dist {
                if closest.map_or(true, |(_, min_dist)| dist < min_dist) {
                    closest = Some((ind, dist));
                }
            }
        }

        closest
    }
}

impl Display for RoutePlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Travel Map Connections:")?;
        for (ind, loc) in self.locations.iter().enumerate() {
            write!(f, "{}: ", loc)?;
            for (neighbor, cost) in self.neighbors_at(ind) {
                write!(f, "{}({}) ", neighbor, cost)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
