//! Unit tests for the Identifiers module

use core_kernel::{PolicyId, PartyId, TransferId, SubscriptionId};
use uuid::Uuid;

mod party_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(PartyId::new(), PartyId::new());
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = PartyId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_display_and_parse_round_trip() {
        let original = PartyId::new();
        let parsed: PartyId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_invalid_uuid() {
        assert!("PTY-not-a-uuid".parse::<PartyId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&PartyId::from(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

mod prefixes {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(PolicyId::PREFIX, "POL");
        assert_eq!(PartyId::PREFIX, "PTY");
        assert_eq!(TransferId::PREFIX, "TRF");
        assert_eq!(SubscriptionId::PREFIX, "SUB");
    }

    #[test]
    fn test_new_v7_is_time_ordered() {
        let first = PolicyId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = PolicyId::new_v7();
        let a: Uuid = first.into();
        let b: Uuid = second.into();
        assert!(a < b);
    }
}
