//! Unit tests for hcp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{FieldId, HarvesterId, SapId, TvId};

    #[test]
    fn index_roundtrip() {
        let id = FieldId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(FieldId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(TvId(0) < TvId(1));
        assert!(HarvesterId(100) > HarvesterId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(FieldId::INVALID.0, u32::MAX);
        assert_eq!(TvId::INVALID.0, u32::MAX);
        assert_eq!(SapId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(HarvesterId(7).to_string(), "HarvesterId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimDuration, SimTime};

    #[test]
    fn time_arithmetic() {
        let t = SimTime::from_secs(10);
        assert_eq!(t + SimDuration::from_secs(5), SimTime::from_secs(15));
        assert_eq!(SimTime::from_secs(15) - t, SimDuration::from_secs(5));
        assert_eq!(t.since(SimTime::ZERO), SimDuration::from_secs(10));
    }

    #[test]
    fn fractional_seconds_round_half_up() {
        assert_eq!(SimDuration::from_secs_f64(1.2345), SimDuration(1_235));
        assert_eq!(SimDuration::from_secs_f64(1.2344), SimDuration(1_234));
        assert_eq!(SimDuration::from_secs_f64(0.0), SimDuration::ZERO);
    }

    #[test]
    fn negative_seconds_clamp_to_zero() {
        assert_eq!(SimDuration::from_secs_f64(-3.0), SimDuration::ZERO);
    }

    #[test]
    fn saturating_duration_sub() {
        let a = SimDuration::from_secs(1);
        let b = SimDuration::from_secs(2);
        assert_eq!(a - b, SimDuration::ZERO);
    }

    #[test]
    fn display() {
        assert_eq!(SimTime::from_secs(90).to_string(), "T+90s");
        assert_eq!(SimDuration(1_500).to_string(), "1.5s");
    }
}

#[cfg(test)]
mod location {
    use crate::{AgentKind, DepotId, FieldId, Location};

    #[test]
    fn ordering_is_total_and_stable() {
        // Depot sorts before Field variants regardless of inner id.
        assert!(Location::Depot(DepotId(9)) < Location::Field(FieldId(0)));
        assert!(Location::Field(FieldId(0)) < Location::Field(FieldId(1)));
    }

    #[test]
    fn display() {
        assert_eq!(Location::Field(FieldId(3)).to_string(), "field_3");
        assert_eq!(AgentKind::Transport.to_string(), "transport");
    }
}
