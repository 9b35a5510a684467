//! Nearest-neighbour visiting order.

use caravan_core::ReferenceData;
use rand::Rng;

use crate::fallback::{Fallback, resolve_or_default};

/// Order the destinations with the nearest-neighbour heuristic.
///
/// The walk starts at `departure`. When `preferred_start` names one of the
/// destinations it is visited first, otherwise each step moves to the
/// closest unvisited city. Distance ties go to the city listed first in
/// `destinations`; if no candidate has a known distance the next city is
/// drawn uniformly. Duplicate destinations and the departure itself are
/// dropped, so the result never contains the departure.
pub fn optimise_route<D, R>(
    departure: &str,
    destinations: &[String],
    preferred_start: Option<&str>,
    data: &D,
    rng: &mut R,
) -> Vec<String>
where
    D: ReferenceData + ?Sized,
    R: Rng + ?Sized,
{
    let mut remaining: Vec<String> = Vec::with_capacity(destinations.len());
    for city in destinations {
        if city != departure && !remaining.contains(city) {
            remaining.push(city.clone());
        }
    }

    let mut forced = preferred_start;
    let mut route = Vec::with_capacity(remaining.len());
    let mut current = departure.to_owned();
    while !remaining.is_empty() {
        let preferred_index = forced
            .take()
            .and_then(|wanted| remaining.iter().position(|city| city == wanted));
        let Some(index) = preferred_index.or_else(|| nearest(&current, &remaining, data, rng))
        else {
            break;
        };
        let next = remaining.remove(index);
        current.clone_from(&next);
        route.push(next);
    }
    route
}

fn nearest<D, R>(current: &str, candidates: &[String], data: &D, rng: &mut R) -> Option<usize>
where
    D: ReferenceData + ?Sized,
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let distance = resolve_or_default(
            data.distance(current, candidate),
            Fallback::Unbounded,
            rng,
            || format!("leg {current} -> {candidate}"),
        );
        if !distance.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, shortest)| distance < shortest) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index).or_else(|| {
        log::debug!("no known distance from {current}; picking the next city at random");
        Some(rng.gen_range(0..candidates.len()))
    })
}
