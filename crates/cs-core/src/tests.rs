//! Unit tests for cs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, ProcessId, TruckId};

    #[test]
    fn index_roundtrip() {
        let id = TruckId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(TruckId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(TruckId(0) < TruckId(1));
        assert!(ProcessId(100) > ProcessId(99));
        assert!(EntityId::Signal < EntityId::Truck(TruckId(0)));
    }

    #[test]
    fn display() {
        assert_eq!(ProcessId(7).to_string(), "ProcessId(7)");
        assert_eq!(TruckId(0).label(), "LKW-1");
        assert_eq!(EntityId::Truck(TruckId(9)).to_string(), "LKW-10");
        assert_eq!(EntityId::Signal.to_string(), "signal");
    }

    #[test]
    fn entity_truck_accessor() {
        assert_eq!(EntityId::Truck(TruckId(3)).truck(), Some(TruckId(3)));
        assert_eq!(EntityId::Signal.truck(), None);
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn rejects_non_finite() {
        assert!(SimTime::new(f64::NAN).is_none());
        assert!(SimTime::new(f64::INFINITY).is_none());
        assert!(SimTime::new(f64::NEG_INFINITY).is_none());
        assert!(SimTime::new(12.5).is_some());
    }

    #[test]
    fn negative_zero_equals_zero() {
        let z = SimTime::new(-0.0).unwrap();
        assert_eq!(z, SimTime::ZERO);
        assert_eq!(z.cmp(&SimTime::ZERO), std::cmp::Ordering::Equal);
    }

    #[test]
    fn arithmetic() {
        let t = SimTime::new(10.0).unwrap();
        assert_eq!(t.checked_add(5.5), SimTime::new(15.5));
        assert_eq!(SimTime::new(15.0).unwrap() - t, 5.0);
        assert_eq!(t.since(SimTime::ZERO), 10.0);
        assert!(t.checked_add(f64::INFINITY).is_none());
    }

    #[test]
    fn total_order() {
        let mut v: Vec<SimTime> = [3.0, 0.5, 2.25, 0.0]
            .into_iter()
            .map(|m| SimTime::new(m).unwrap())
            .collect();
        v.sort();
        let mins: Vec<f64> = v.iter().map(|t| t.minutes()).collect();
        assert_eq!(mins, vec![0.0, 0.5, 2.25, 3.0]);
    }

    #[test]
    fn display_whole_minutes() {
        assert_eq!(SimTime::new(56.0).unwrap().to_string(), "56");
        assert_eq!(SimTime::new(56.5).unwrap().to_string(), "56.5");
    }
}

#[cfg(test)]
mod rng {
    use crate::{EntityRng, TruckId, resolve_seed};

    #[test]
    fn same_seed_same_stream() {
        let mut a = EntityRng::new(42, TruckId(3));
        let mut b = EntityRng::new(42, TruckId(3));
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1_000u32), b.gen_range(0..1_000u32));
        }
    }

    #[test]
    fn different_trucks_diverge() {
        let mut a = EntityRng::new(42, TruckId(0));
        let mut b = EntityRng::new(42, TruckId(1));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1_000_000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1_000_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn explicit_seed_is_kept() {
        assert_eq!(resolve_seed(Some(7)), 7);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, SimConfig};

    #[test]
    fn default_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn non_positive_duration_rejected() {
        let cfg = SimConfig { red_light_duration: 0.0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidConfiguration(_))));

        let cfg = SimConfig { drive_time_origin_to_signal: -1.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig { simulation_horizon: f64::NAN, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_fleet_rejected() {
        let cfg = SimConfig { truck_count: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_round_trips_rejected() {
        let cfg = SimConfig { round_trips: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_range_rejected() {
        let cfg = SimConfig { load_unload_range: [41.0, 30.0], ..SimConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("greater than"), "got {err}");
    }

    #[test]
    fn degenerate_range_allowed() {
        let cfg = SimConfig { load_unload_range: [30.0, 30.0], ..SimConfig::default() };
        cfg.validate().unwrap();
    }

    #[test]
    fn derived_bounds() {
        let cfg = SimConfig::default();
        // 2*26 + 2*10 + 2*30
        assert_eq!(cfg.min_round_trip_time(), 132.0);
        assert_eq!(cfg.min_completion_time(), 396.0);
        assert_eq!(cfg.signal_period(), 8.0);
        assert_eq!(cfg.horizon().minutes(), 480.0);
    }
}

#[cfg(test)]
mod event {
    use crate::{EntityId, EventKind, Leg, LifecycleEvent, SimTime, TruckId};

    #[test]
    fn display_includes_payload() {
        let e = LifecycleEvent {
            time:   SimTime::new(57.0).unwrap(),
            entity: EntityId::Truck(TruckId(0)),
            kind:   EventKind::WaitingAtRed { leg: Leg::Outbound, wait: 2.0 },
        };
        assert_eq!(e.to_string(), "[57] LKW-1 waiting_at_red 2");
    }

    #[test]
    fn names_are_distinct() {
        let kinds = [
            EventKind::Started,
            EventKind::Loading { duration: 1.0 },
            EventKind::DepartedOrigin,
            EventKind::PassedGreen { leg: Leg::Inbound },
            EventKind::WaitingAtRed { leg: Leg::Inbound, wait: 1.0 },
            EventKind::ArrivedDestination,
            EventKind::Unloading { duration: 1.0 },
            EventKind::DepartedDestination,
            EventKind::ArrivedOrigin { trip: 1 },
            EventKind::Finished { total_time: 1.0 },
            EventKind::SignalGreen,
            EventKind::SignalRed { next_green: SimTime::ZERO },
        ];
        let mut names: Vec<&str> = kinds.iter().map(EventKind::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), kinds.len());
    }
}
