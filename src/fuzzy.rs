/// Commands understood by the shell front end, in suggestion priority order.
pub const COMMANDS: &[&str] = &[
    "banao", "dikhao", "mitao", "jaane", "padh", "likh",
    "chalo", "wapas", "itihas", "dhoondo", "khojo",
    "banaoDir", "jaha", "bye",
];


/// Levenshtein distance over bytes: insertions, deletions and substitutions all cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {

    let (a, b) = (a.as_bytes(), b.as_bytes());

    let mut dp = vec![vec![0_usize; b.len() + 1]; a.len() + 1];

    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1]
            } else {
                1 + dp[i - 1][j].min(dp[i][j - 1]).min(dp[i - 1][j - 1])
            };
        }
    }

    dp[a.len()][b.len()]
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {

    pub candidate: &'a str,
    pub distance: usize

}


/// Returns the vocabulary entry closest to `token`. Ties go to the entry listed first.
pub fn closest_match<'a>(token: &str, vocabulary: &[&'a str]) -> Option<Match<'a>> {

    let mut best: Option<Match<'a>> = None;

    for &candidate in vocabulary {

        let distance = edit_distance(token, candidate);

        if best.map_or(true, |best| distance < best.distance) {
            best = Some(Match { candidate, distance });
        }
    }

    best
}


/// Suggests a correction for `token`, or nothing if it is already valid.
pub fn suggest<'a>(token: &str, vocabulary: &[&'a str]) -> Option<&'a str> {

    if vocabulary.iter().any(|&entry| entry == token) {
        return None;
    }

    closest_match(token, vocabulary).map(|found| found.candidate)
}


#[cfg(test)]
mod tests {

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;


    fn random_word(rng: &mut StdRng) -> String {
        (0..rng.gen_range(0..8))
            .map(|_| (b'a' + rng.gen_range(0..3)) as char)
            .collect()
    }


    #[test]
    fn known_distances() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("dikaho", "dikhao"), 2);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
    }


    #[test]
    fn metric_laws() {

        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..500 {

            let a = random_word(&mut rng);
            let b = random_word(&mut rng);
            let c = random_word(&mut rng);

            let ab = edit_distance(&a, &b);

            assert_eq!(edit_distance(&a, &a), 0);
            assert_eq!(ab, edit_distance(&b, &a), "symmetry of {a:?} {b:?}");
            assert_eq!(ab == 0, a == b, "identity of {a:?} {b:?}");
            assert!(edit_distance(&a, &c) <= ab + edit_distance(&b, &c), "triangle {a:?} {b:?} {c:?}");

            // Bounded by the longer length, at least the length difference
            assert!(ab <= a.len().max(b.len()));
            assert!(ab >= a.len().abs_diff(b.len()));
        }
    }


    #[test]
    fn suggests_closest_command() {

        let found = closest_match("dikaho", COMMANDS).unwrap();

        assert_eq!(found.candidate, "dikhao");
        assert_eq!(suggest("dikaho", COMMANDS), Some("dikhao"));
        assert_eq!(suggest("bnao", COMMANDS), Some("banao"));
        assert_eq!(suggest("itihaas", COMMANDS), Some("itihas"));
    }


    #[test]
    fn ties_go_to_first_entry() {

        let found = closest_match("ab", &["ax", "ay", "ab_"]).unwrap();

        assert_eq!(found, Match { candidate: "ax", distance: 1 });

        let found = closest_match("ab", &["ay", "ax"]).unwrap();
        assert_eq!(found.candidate, "ay");
    }


    #[test]
    fn valid_or_empty() {

        assert_eq!(suggest("likh", COMMANDS), None);
        assert_eq!(closest_match("likh", COMMANDS), Some(Match { candidate: "likh", distance: 0 }));

        assert_eq!(closest_match("anything", &[]), None);
        assert_eq!(suggest("anything", &[]), None);
    }

}
