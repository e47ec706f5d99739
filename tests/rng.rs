mod tests {
    use ensemble_light_engine::{Rng, SplitMix64};

    #[test]
    fn test_deterministic_sequence() {
        let mut a = SplitMix64::new(0xDEAD_BEEF);
        let mut b = SplitMix64::new(0xDEAD_BEEF);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_seeds_diverge() {
        let mut a = SplitMix64::new(1);
        let mut b = SplitMix64::new(2);
        let same = (0..16).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 16);
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = SplitMix64::new(99);
        for _ in 0..256 {
            let value = rng.random_range(100, 250);
            assert!((100..250).contains(&value));
        }
        // Degenerate ranges collapse to the lower bound.
        assert_eq!(rng.random_range(7, 7), 7);
        assert_eq!(rng.random_range(7, 3), 7);
    }
}
