use proptest::prelude::*;
use pulse_fs::NormalizedPath;

proptest! {
    #[test]
    fn normalization_is_idempotent(s in "\\PC*") {
        let once = NormalizedPath::new(&s);
        let twice = NormalizedPath::new(once.as_str());
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.as_str().contains('\\'));
        prop_assert!(!once.as_str().contains("//"));
    }

    #[test]
    fn joined_child_is_relative_to_base(base in "[a-z]{1,8}(/[a-z]{1,8}){0,3}", child in "[a-z]{1,8}(/[a-z]{1,8}){0,3}") {
        let base = NormalizedPath::new(&base);
        let joined = base.join(&child);
        let relative = joined.relative_to(&base).unwrap();
        prop_assert_eq!(relative.as_str(), child.as_str());
    }
}
