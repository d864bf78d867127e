//! Wavefront arrival simulation.
//!
//! `ArrivalSimulator` is the core of the program: given the fixed scene
//! geometry and a propagation speed, `advance(t)` reports the wavefront
//! radius, which sensors have been reached, and the one-time triangulation
//! overlay events. The simulator never schedules or renders; the driving
//! loop owns all timing and feeds it monotonically increasing `t` values.

use log::{debug, info};

use super::geometry;
use super::types::{EmissionStage, FrameResult, OverlayEvent, Point, Sensor};
use crate::common::scene::SceneConfig;

/// Deterministic wavefront arrival simulator.
///
/// Sensor distances and arrival times are derived once at construction.
/// The only mutable state is the overlay emission latch: the stage field,
/// the per-pair emitted flags, and bookkeeping for one-shot log lines.
pub struct ArrivalSimulator {
    speed: f64,
    source: Point,
    sensors: Vec<Sensor>,
    max_distance: f64,
    pair_margin: f64,
    marker_margin: f64,
    /// Unordered sensor pairs in emission scan order: (i, j) with i < j,
    /// outer loop over i ascending, inner over j ascending.
    pairs: Vec<(usize, usize)>,
    pair_emitted: Vec<bool>,
    stage: EmissionStage,
    arrival_logged: Vec<bool>,
}

impl ArrivalSimulator {
    /// Build a simulator from a validated scene configuration.
    pub fn new(config: &SceneConfig) -> Self {
        let source = config.source_position;
        let sensors: Vec<Sensor> = config
            .sensor_layout()
            .into_iter()
            .map(|position| {
                let distance = geometry::distance(&position, &source);
                Sensor {
                    position,
                    distance,
                    arrival_time: distance / config.propagation_speed,
                }
            })
            .collect();

        let max_distance = sensors.iter().map(|s| s.distance).fold(0.0, f64::max);

        let mut pairs = Vec::new();
        for i in 0..sensors.len() {
            for j in (i + 1)..sensors.len() {
                pairs.push((i, j));
            }
        }
        let pair_count = pairs.len();
        let sensor_count = sensors.len();

        Self {
            speed: config.propagation_speed,
            source,
            sensors,
            max_distance,
            pair_margin: config.pair_margin,
            marker_margin: config.marker_margin,
            pairs,
            pair_emitted: vec![false; pair_count],
            stage: EmissionStage::default(),
            arrival_logged: vec![false; sensor_count],
        }
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn source(&self) -> Point {
        self.source
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Distance from the source to the farthest sensor.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn stage(&self) -> EmissionStage {
        self.stage
    }

    /// Largest simulated time of interest: 1.5x the latest arrival time,
    /// leaving room for the post-arrival overlay choreography.
    pub fn max_time(&self) -> f64 {
        self.sensors.iter().map(|s| s.arrival_time).fold(0.0, f64::max) * 1.5
    }

    /// Advance the simulation to elapsed time `t` (seconds, `t >= 0`).
    ///
    /// Radius and reached flags are pure functions of `t`. Overlay events
    /// are latched: each pair's triangle-and-circles sequence fires on the
    /// first frame where every sensor is reached and the wavefront has
    /// cleared both of the pair's distances by `pair_margin`; the
    /// localized-source marker fires once after all pairs, when the radius
    /// exceeds the maximum sensor distance by `marker_margin`. After that
    /// the stage is `Done` and the event list stays empty forever.
    pub fn advance(&mut self, t: f64) -> FrameResult {
        let radius = self.speed * t;
        let reached: Vec<bool> = self.sensors.iter().map(|s| radius >= s.distance).collect();

        for (index, sensor) in self.sensors.iter().enumerate() {
            if reached[index] && !self.arrival_logged[index] {
                info!(
                    "wavefront reached sensor #{} at t = {:.4} s (distance {:.3})",
                    index, t, sensor.distance
                );
                self.arrival_logged[index] = true;
            }
        }

        let mut events = Vec::new();

        if self.stage == EmissionStage::NotStarted && reached.iter().all(|r| *r) {
            info!("all {} sensors reached at t = {:.4} s, starting triangulation overlay", self.sensors.len(), t);
            self.stage = EmissionStage::EmittingPairs;
        }

        if self.stage == EmissionStage::EmittingPairs {
            for (k, &(i, j)) in self.pairs.iter().enumerate() {
                if self.pair_emitted[k] {
                    continue;
                }
                if radius >= self.sensors[i].distance + self.pair_margin && radius >= self.sensors[j].distance + self.pair_margin {
                    debug!("emitting triangulation overlay for sensor pair ({}, {})", i, j);
                    events.push(OverlayEvent::Triangle { i, j });
                    events.push(OverlayEvent::RangeCircle(i));
                    events.push(OverlayEvent::RangeCircle(j));
                    self.pair_emitted[k] = true;
                }
            }

            if self.pair_emitted.iter().all(|e| *e) && radius > self.max_distance + self.marker_margin {
                info!("localized-source marker emitted at t = {:.4} s", t);
                events.push(OverlayEvent::LocalizedSource);
                self.stage = EmissionStage::Done;
            }
        }

        FrameResult { t, radius, reached, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_simulator() -> ArrivalSimulator {
        ArrivalSimulator::new(&SceneConfig::default())
    }

    fn scene_with_positions(positions: Vec<Point>, source: Point) -> SceneConfig {
        SceneConfig {
            sensor_positions: Some(positions),
            source_position: source,
            ..SceneConfig::default()
        }
    }

    /// Drive the simulator over evenly spaced frames and collect every event.
    fn run_collecting_events(sim: &mut ArrivalSimulator, t_end: f64, steps: u32) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        for frame in 0..=steps {
            let t = t_end * (frame as f64) / (steps as f64);
            events.extend(sim.advance(t).events);
        }
        events
    }

    #[test]
    fn distances_and_arrival_times_follow_the_geometry() {
        let sim = default_simulator();
        let source = sim.source();
        assert_eq!(sim.sensors().len(), 5);
        for sensor in sim.sensors() {
            let expected = geometry::distance(&sensor.position, &source);
            assert_eq!(sensor.distance, expected);
            assert_eq!(sensor.arrival_time, expected / 343.0);
            // Unit ring around the origin, source at (2, 2): every distance
            // lies within |source| ± ring radius.
            assert!(sensor.distance > 8f64.sqrt() - 1.0);
            assert!(sensor.distance < 8f64.sqrt() + 1.0);
        }
    }

    #[test]
    fn radius_is_linear_in_time() {
        let mut sim = default_simulator();
        assert_eq!(sim.advance(0.0).radius, 0.0);
        assert_eq!(sim.advance(0.001).radius, 343.0 * 0.001);
        assert_eq!(sim.advance(0.01).radius, 343.0 * 0.01);

        // Monotone non-decreasing over any non-decreasing t sequence.
        let mut last = 0.0;
        for frame in 0..100 {
            let radius = sim.advance(frame as f64 * 1e-4).radius;
            assert!(radius >= last);
            last = radius;
        }
    }

    #[test]
    fn reached_flag_flips_exactly_at_the_arrival_time() {
        // Unit speed keeps t == radius, so the threshold comparison is exact.
        let config = SceneConfig {
            propagation_speed: 1.0,
            ..scene_with_positions(vec![Point { x: 3.0, y: 0.0 }, Point { x: 0.0, y: 4.0 }], Point { x: 0.0, y: 0.0 })
        };
        let mut sim = ArrivalSimulator::new(&config);

        let arrival = sim.sensors()[0].arrival_time; // distance 3.0
        assert_eq!(sim.advance(arrival * 0.999).reached, vec![false, false]);
        // radius >= distance is inclusive at the exact arrival time
        assert_eq!(sim.advance(arrival).reached[0], true);
        assert_eq!(sim.advance(arrival).reached[1], false);

        // Never reverts for increasing t.
        let later = sim.advance(arrival * 10.0);
        assert_eq!(later.reached, vec![true, true]);
    }

    #[test]
    fn no_sensor_is_reached_at_t_zero_and_all_at_max_arrival() {
        let mut sim = default_simulator();
        let first = sim.advance(0.0);
        assert!(first.reached.iter().all(|r| !*r));
        assert!(first.events.is_empty());

        let t_all = sim.max_distance() / sim.speed();
        let frame = sim.advance(t_all);
        assert!(frame.reached.iter().all(|r| *r));
        // Pair emission begins on this frame: every pair not involving the
        // farthest sensor has already cleared its +0.1 margin.
        assert_eq!(sim.stage(), EmissionStage::EmittingPairs);
        assert!(frame.events.iter().any(|e| matches!(e, OverlayEvent::Triangle { .. })));
    }

    #[test]
    fn one_large_step_emits_everything_in_scan_order() {
        let mut sim = default_simulator();
        // Radius far past max_distance + marker_margin on a single frame.
        let events = sim.advance(1.0).events;

        let expected_pairs = [(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)];
        let mut cursor = 0;
        for (i, j) in expected_pairs {
            assert_eq!(events[cursor], OverlayEvent::Triangle { i, j });
            assert_eq!(events[cursor + 1], OverlayEvent::RangeCircle(i));
            assert_eq!(events[cursor + 2], OverlayEvent::RangeCircle(j));
            cursor += 3;
        }
        assert_eq!(events[cursor], OverlayEvent::LocalizedSource);
        assert_eq!(events.len(), cursor + 1);
        assert_eq!(sim.stage(), EmissionStage::Done);
    }

    #[test]
    fn pairs_are_emitted_exactly_once_across_fine_stepping() {
        let mut sim = default_simulator();
        let t_end = sim.max_time() * 2.0;
        let events = run_collecting_events(&mut sim, t_end, 2000);

        let triangles: Vec<(usize, usize)> = events
            .iter()
            .filter_map(|e| match e {
                OverlayEvent::Triangle { i, j } => Some((*i, *j)),
                _ => None,
            })
            .collect();
        assert_eq!(triangles.len(), 10);
        for (i, j) in &triangles {
            assert!(i < j);
        }
        let mut deduped = triangles.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 10);

        // One circle pair per triangle, one marker total.
        let circles = events.iter().filter(|e| matches!(e, OverlayEvent::RangeCircle(_))).count();
        assert_eq!(circles, 20);
        let markers = events.iter().filter(|e| matches!(e, OverlayEvent::LocalizedSource)).count();
        assert_eq!(markers, 1);
        assert_eq!(*events.last().unwrap(), OverlayEvent::LocalizedSource);
    }

    #[test]
    fn pair_emission_respects_the_margin_threshold() {
        // Distances 3.0 and 4.0 from the source at the origin; unit speed
        // so t maps to radius directly.
        let config = SceneConfig {
            propagation_speed: 1.0,
            ..scene_with_positions(vec![Point { x: 3.0, y: 0.0 }, Point { x: 0.0, y: 4.0 }], Point { x: 0.0, y: 0.0 })
        };
        let mut sim = ArrivalSimulator::new(&config);

        // All reached, but radius 4.05 has not cleared 4.0 + 0.1 yet.
        let frame = sim.advance(4.05);
        assert!(frame.reached.iter().all(|r| *r));
        assert_eq!(sim.stage(), EmissionStage::EmittingPairs);
        assert!(frame.events.is_empty());

        // Radius 4.2 clears both margins; the pair fires now, once.
        let frame = sim.advance(4.2);
        assert_eq!(
            frame.events,
            vec![OverlayEvent::Triangle { i: 0, j: 1 }, OverlayEvent::RangeCircle(0), OverlayEvent::RangeCircle(1)]
        );

        // Marker waits for radius > 4.0 + 1.0.
        assert!(sim.advance(4.9).events.is_empty());
        assert!(sim.advance(5.0).events.is_empty());
        let frame = sim.advance(5.1);
        assert_eq!(frame.events, vec![OverlayEvent::LocalizedSource]);
        assert_eq!(sim.stage(), EmissionStage::Done);
    }

    #[test]
    fn marker_fires_strictly_after_all_pair_events() {
        let mut sim = default_simulator();
        let t_end = sim.max_time() * 2.0;
        let events = run_collecting_events(&mut sim, t_end, 500);
        let marker_index = events.iter().position(|e| matches!(e, OverlayEvent::LocalizedSource)).unwrap();
        assert_eq!(marker_index, events.len() - 1);
        let pair_events = events.iter().take(marker_index).count();
        assert_eq!(pair_events, 30); // 10 triangles + 20 circles
    }

    #[test]
    fn advance_is_idempotent_after_the_marker() {
        let mut sim = default_simulator();
        let t_done = sim.max_time() * 2.0;
        let events = sim.advance(t_done).events;
        assert_eq!(*events.last().unwrap(), OverlayEvent::LocalizedSource);

        for frame in 0..50 {
            let t = t_done + frame as f64 * 1e-3;
            let result = sim.advance(t);
            assert!(result.events.is_empty());
            assert!(result.reached.iter().all(|r| *r));
        }
        assert_eq!(sim.stage(), EmissionStage::Done);
    }

    #[test]
    fn equidistant_sensors_still_produce_every_pair() {
        // Sensors 0 and 1 are equidistant from the source.
        let config = scene_with_positions(
            vec![Point { x: 1.0, y: 0.0 }, Point { x: -1.0, y: 0.0 }, Point { x: 0.0, y: 1.0 }],
            Point { x: 0.0, y: 2.0 },
        );
        let mut sim = ArrivalSimulator::new(&config);
        let events = sim.advance(1.0).events;

        let triangles: Vec<(usize, usize)> = events
            .iter()
            .filter_map(|e| match e {
                OverlayEvent::Triangle { i, j } => Some((*i, *j)),
                _ => None,
            })
            .collect();
        assert_eq!(triangles, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn max_time_leaves_headroom_past_the_last_arrival() {
        let sim = default_simulator();
        let latest = sim.sensors().iter().map(|s| s.arrival_time).fold(0.0, f64::max);
        assert_eq!(sim.max_time(), latest * 1.5);
        assert_eq!(latest, sim.max_distance() / sim.speed());
    }
}
